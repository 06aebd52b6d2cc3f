use eduzone_models::{AuthResponse, LoginDto, RegisterDto, UpdateProfileDto, UserProfile};

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let dto = LoginDto {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        };
        self.post("/auth/login", &dto).await
    }

    pub async fn register(&self, dto: &RegisterDto) -> Result<AuthResponse, ClientError> {
        self.post("/auth/register", dto).await
    }

    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        self.get("/auth/me").await
    }

    pub async fn update_me(&self, dto: &UpdateProfileDto) -> Result<UserProfile, ClientError> {
        self.put("/auth/me", dto).await
    }
}
