use anyhow::{Context, anyhow};
use tracing::{info, instrument};

use eduzone_core::AppError;
use eduzone_db::Repositories;
use eduzone_models::{Teacher, TeacherDto};

use crate::validator::validated;

pub struct TeacherService;

fn not_found() -> AppError {
    AppError::not_found(anyhow!("Teacher not found"))
}

impl TeacherService {
    #[instrument(skip(repos), fields(db.operation = "SELECT", db.table = "teachers"))]
    pub async fn list_teachers(repos: &Repositories) -> Result<Vec<Teacher>, AppError> {
        Ok(repos
            .teachers
            .list()
            .await
            .context("Error fetching teachers")?)
    }

    #[instrument(skip(repos), fields(db.operation = "SELECT", db.table = "teachers"))]
    pub async fn get_teacher(repos: &Repositories, id: i64) -> Result<Teacher, AppError> {
        repos
            .teachers
            .find_by_id(id)
            .await
            .context("Error fetching teacher")?
            .ok_or_else(not_found)
    }

    #[instrument(skip(repos, dto), fields(db.operation = "INSERT", db.table = "teachers"))]
    pub async fn create_teacher(
        repos: &Repositories,
        dto: TeacherDto,
    ) -> Result<Teacher, AppError> {
        let new_teacher = validated(dto, TeacherDto::into_new)?;

        let teacher = repos
            .teachers
            .create(new_teacher)
            .await
            .context("Error creating teacher")?;

        info!(teacher.id = teacher.id, teacher.name = %teacher.name, "Teacher created");
        Ok(teacher)
    }

    #[instrument(skip(repos, dto), fields(db.operation = "UPDATE", db.table = "teachers"))]
    pub async fn update_teacher(
        repos: &Repositories,
        id: i64,
        dto: TeacherDto,
    ) -> Result<Teacher, AppError> {
        let changes = validated(dto, TeacherDto::into_new)?;

        let teacher = repos
            .teachers
            .update(id, changes)
            .await
            .context("Error updating teacher")?
            .ok_or_else(not_found)?;

        info!(teacher.id = teacher.id, "Teacher updated");
        Ok(teacher)
    }

    #[instrument(skip(repos), fields(db.operation = "DELETE", db.table = "teachers"))]
    pub async fn delete_teacher(repos: &Repositories, id: i64) -> Result<(), AppError> {
        if !repos
            .teachers
            .delete(id)
            .await
            .context("Error deleting teacher")?
        {
            return Err(not_found());
        }

        info!(teacher.id = id, "Teacher deleted");
        Ok(())
    }
}
