use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use eduzone_models::forms::UploadFormRequest;
use eduzone_models::{
    ActiveLoan, AuthResponse, Book, CalendarEvent, CreateBookDto, CreateFeedbackDto,
    CreateStaffDto, EventDto, Feedback, FeedbackStatus, Form, FormDownload, LoginDto, RegisterDto,
    StaffMember, Teacher, TeacherDto, UpdateBookDto, UpdateFeedbackStatusDto, UpdateFormDto,
    UpdateProfileDto, UpdateStaffDto, UserProfile, UserRole,
};

use crate::modules::system::model::{ApiIndex, EndpointGroup, HealthStatus};

/// Error envelope returned by every failing request.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    /// Present on validation failures: the missing or invalid fields
    pub fields: Option<Vec<String>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::system::controller::api_index,
        crate::modules::system::controller::health_check,
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::get_me,
        crate::modules::auth::controller::update_me,
        crate::modules::books::controller::get_books,
        crate::modules::books::controller::get_book,
        crate::modules::books::controller::create_book,
        crate::modules::books::controller::update_book,
        crate::modules::books::controller::delete_book,
        crate::modules::books::controller::checkout_book,
        crate::modules::books::controller::return_book,
        crate::modules::books::controller::get_my_loans,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::staff::controller::get_staff,
        crate::modules::staff::controller::get_staff_member,
        crate::modules::staff::controller::create_staff_member,
        crate::modules::staff::controller::update_staff_member,
        crate::modules::staff::controller::delete_staff_member,
        crate::modules::calendar::controller::get_events,
        crate::modules::calendar::controller::get_event,
        crate::modules::calendar::controller::create_event,
        crate::modules::calendar::controller::update_event,
        crate::modules::calendar::controller::delete_event,
        crate::modules::forms::controller::get_forms,
        crate::modules::forms::controller::get_form,
        crate::modules::forms::controller::upload_form,
        crate::modules::forms::controller::update_form,
        crate::modules::forms::controller::delete_form,
        crate::modules::forms::controller::download_form,
        crate::modules::feedback::controller::get_all_feedback,
        crate::modules::feedback::controller::get_feedback,
        crate::modules::feedback::controller::create_feedback,
        crate::modules::feedback::controller::update_feedback_status,
        crate::modules::feedback::controller::delete_feedback,
    ),
    components(
        schemas(
            ApiIndex,
            EndpointGroup,
            HealthStatus,
            UserRole,
            UserProfile,
            RegisterDto,
            LoginDto,
            UpdateProfileDto,
            AuthResponse,
            Book,
            CreateBookDto,
            UpdateBookDto,
            ActiveLoan,
            Teacher,
            TeacherDto,
            StaffMember,
            CreateStaffDto,
            UpdateStaffDto,
            CalendarEvent,
            EventDto,
            Form,
            UpdateFormDto,
            FormDownload,
            UploadFormRequest,
            Feedback,
            FeedbackStatus,
            CreateFeedbackDto,
            UpdateFeedbackStatusDto,
            ErrorResponse,
            ErrorBody,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "System", description = "API index and health check"),
        (name = "Authentication", description = "Registration, login and the current user"),
        (name = "Books", description = "Library catalogue, checkout, return and loans"),
        (name = "Teachers", description = "Teacher contact directory"),
        (name = "Staff", description = "Staff directory"),
        (name = "Calendar", description = "School calendar events"),
        (name = "Forms", description = "Downloadable school forms"),
        (name = "Feedback", description = "Feedback submissions and review")
    ),
    info(
        title = "EduZone API",
        version = "0.1.0",
        description = "School portal REST API built with Rust, Axum, and PostgreSQL with JWT-based authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
