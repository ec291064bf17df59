use uuid::Uuid;

use crate::core::security;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::types::UserRole;
use crate::repositories;

/// Registration always yields STUDENT accounts, so the first ADMIN has to be
/// provisioned at startup from FIRST_SUPERUSER_* settings.
pub(crate) async fn ensure_superuser(state: &AppState) -> anyhow::Result<()> {
    let admin = state.settings().admin();
    if admin.first_superuser_password.is_empty() {
        tracing::warn!("FIRST_SUPERUSER_PASSWORD not configured; skipping superuser creation");
        return Ok(());
    }

    let email = admin.first_superuser_email.trim().to_lowercase();
    let user = repositories::users::find_by_email(state.db(), &email).await?;
    let now = primitive_now_utc();

    if let Some(user) = user {
        let mut needs_update = false;

        let verified =
            security::verify_password(&admin.first_superuser_password, &user.hashed_password)
                .unwrap_or(false);
        let hashed_password = if verified {
            None
        } else {
            needs_update = true;
            Some(security::hash_password(&admin.first_superuser_password)?)
        };

        let role = if user.role != UserRole::Admin {
            needs_update = true;
            Some(UserRole::Admin)
        } else {
            None
        };

        let is_active = if !user.is_active {
            needs_update = true;
            Some(true)
        } else {
            None
        };

        if needs_update {
            repositories::users::update(
                state.db(),
                &user.id,
                repositories::users::UpdateUser {
                    full_name: None,
                    role,
                    is_active,
                    hashed_password,
                    updated_at: now,
                },
            )
            .await?;
            tracing::info!("Updated default superuser {email}");
        } else {
            tracing::info!("Default superuser already up to date");
        }

        return Ok(());
    }

    let hashed_password = security::hash_password(&admin.first_superuser_password)?;

    repositories::users::create(
        state.db(),
        repositories::users::CreateUser {
            id: &Uuid::new_v4().to_string(),
            username: &admin.first_superuser_username,
            email: &email,
            hashed_password,
            full_name: "Super Admin",
            role: UserRole::Admin,
            is_active: true,
            created_at: now,
            updated_at: now,
        },
    )
    .await?;

    tracing::info!("Created default superuser {email}");
    Ok(())
}
