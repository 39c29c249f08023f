use crate::DbConn;
use crate::{
    error::{Error, Result},
    mapping::{to_professional_draft, to_professional_dto},
    models::professionals::{ProfessionalDraft, ProfessionalDto, ProfessionalRequest},
    queries::{professionals, users},
    services::{begin_failed, commit, users::user_not_found},
    validation::{FieldErrors, sanitize_string, validate_max_length},
};
use sqlx::Acquire;

pub fn professional_not_found(id: i32) -> Error {
    Error::NotFound(format!("Profesional no encontrado con ID: {}", id))
}

/// Checks the payload and splits it into a relation-free draft and the
/// owner id still to be resolved.
fn validate_professional(request: ProfessionalRequest) -> Result<(ProfessionalDraft, i32)> {
    let mut errors = FieldErrors::new();

    let specialty = errors.required_text("especialidad", request.specialty, "La especialidad es obligatoria");
    if let Some(specialty) = &specialty {
        errors.check(
            "especialidad",
            validate_max_length(specialty, 255, "La especialidad no puede exceder 255 caracteres"),
        );
    }
    let user_id = errors.required("usuarioId", request.user_id, "El usuario es obligatorio");

    errors.finish(|| Some((to_professional_draft(specialty?, request.available_at), user_id?)))
}

/// Creates a professional profile owned by an existing user.
///
/// A user may own any number of profiles.
pub async fn create_professional(conn: &mut DbConn, request: ProfessionalRequest) -> Result<ProfessionalDto> {
    let (draft, user_id) = validate_professional(request)?;
    tracing::debug!(user_id, "Creating professional");

    let mut tx = conn.begin().await.map_err(begin_failed)?;

    let owner = users::get_user_by_id(&mut tx, user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;

    let professional = professionals::create_professional(&mut tx, &draft.attach(owner.id)).await?;
    let record = professionals::get_professional_record(&mut tx, professional.id)
        .await?
        .ok_or_else(|| professional_not_found(professional.id))?;

    commit(tx).await?;

    tracing::info!(professional_id = record.id, user_id, "Professional created");
    Ok(to_professional_dto(&record))
}

pub async fn get_professional(conn: &mut DbConn, id: i32) -> Result<ProfessionalDto> {
    tracing::debug!(professional_id = id, "Fetching professional");
    let record = professionals::get_professional_record(conn, id)
        .await?
        .ok_or_else(|| professional_not_found(id))?;

    Ok(to_professional_dto(&record))
}

pub async fn list_professionals(conn: &mut DbConn) -> Result<Vec<ProfessionalDto>> {
    let records = professionals::list_professionals(conn).await?;
    Ok(records.iter().map(to_professional_dto).collect())
}

/// Exact specialty match.
pub async fn list_by_specialty(conn: &mut DbConn, specialty: &str) -> Result<Vec<ProfessionalDto>> {
    let specialty = sanitize_string(specialty);
    let records = professionals::list_professionals_by_specialty(conn, &specialty).await?;
    Ok(records.iter().map(to_professional_dto).collect())
}

pub async fn list_by_user(conn: &mut DbConn, user_id: i32) -> Result<Vec<ProfessionalDto>> {
    let records = professionals::list_professionals_by_user(conn, user_id).await?;
    Ok(records.iter().map(to_professional_dto).collect())
}

/// Full-field replace. The owner is re-resolved only when it changes.
pub async fn update_professional(
    conn: &mut DbConn,
    id: i32,
    request: ProfessionalRequest,
) -> Result<ProfessionalDto> {
    let (draft, user_id) = validate_professional(request)?;
    tracing::debug!(professional_id = id, user_id, "Updating professional");

    let mut tx = conn.begin().await.map_err(begin_failed)?;

    let current = professionals::get_professional_by_id(&mut tx, id)
        .await?
        .ok_or_else(|| professional_not_found(id))?;

    if current.user_id != user_id {
        users::get_user_by_id(&mut tx, user_id)
            .await?
            .ok_or_else(|| user_not_found(user_id))?;
    }

    professionals::update_professional(&mut tx, id, &draft.attach(user_id))
        .await?
        .ok_or_else(|| professional_not_found(id))?;
    let record = professionals::get_professional_record(&mut tx, id)
        .await?
        .ok_or_else(|| professional_not_found(id))?;

    commit(tx).await?;

    tracing::info!(professional_id = id, "Professional updated");
    Ok(to_professional_dto(&record))
}

/// Deletes a profile and every appointment assigned to it.
pub async fn delete_professional(conn: &mut DbConn, id: i32) -> Result<()> {
    tracing::debug!(professional_id = id, "Deleting professional");
    if professionals::delete_professional(conn, id).await? == 0 {
        return Err(professional_not_found(id));
    }

    tracing::info!(professional_id = id, "Professional deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_professional_requires_owner_and_specialty() {
        match validate_professional(ProfessionalRequest::default()).unwrap_err() {
            Error::Validation(errors) => {
                assert!(errors.message_for("especialidad").is_some());
                assert!(errors.message_for("usuarioId").is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_professional_builds_draft() {
        let request = ProfessionalRequest {
            specialty: Some(" Clínica ".to_string()),
            available_at: None,
            user_id: Some(4),
        };
        let (draft, user_id) = validate_professional(request).unwrap();
        assert_eq!(user_id, 4);
        let new_professional = draft.attach(user_id);
        assert_eq!(new_professional.specialty, "Clínica");
        assert_eq!(new_professional.user_id, 4);
    }
}
