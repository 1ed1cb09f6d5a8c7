//! Staff administration workflows.
//!
//! The staff page loads in two phases: the user list first, then one
//! `per_page=1` appointment query per user whose `meta.total` becomes the
//! user's appointment count. The count queries run concurrently and a failed
//! one only leaves that count empty.

use futures::future::join_all;

use crate::SERVICE_ADMIN_ROLE;
use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::types::UserId;
use crate::domain::user::{NewUser, User, UserRole};
use crate::dto::staff::{StaffPageData, StaffQuery};
use crate::forms::ToggleActiveForm;
use crate::forms::staff::UserForm;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{
    AppointmentListQuery, AppointmentReader, SortOrder, UserListQuery, UserReader, UserSort,
    UserWriter,
};
use crate::services::{ServiceError, ServiceResult, parse_filter, parse_sort};

/// Roles offered by the staff modal and filter.
pub const STAFF_ROLES: [&str; 4] = ["admin", "veterinarian", "receptionist", "technician"];

async fn appointments_count<R>(repo: &R, user_id: UserId) -> Option<usize>
where
    R: AppointmentReader + ?Sized,
{
    let query = AppointmentListQuery::new().user(user_id).paginate(1, 1);
    match repo.list_appointments(query).await {
        Ok(page) => Some(page.meta.total),
        Err(err) => {
            log::warn!("Failed to count appointments of user {user_id}: {err}");
            None
        }
    }
}

/// Fills `appointments_count` of every user.
pub async fn enrich_with_appointment_counts<R>(repo: &R, users: &mut [User])
where
    R: AppointmentReader + ?Sized,
{
    let counts = join_all(users.iter().map(|user| appointments_count(repo, user.id))).await;
    for (user, count) in users.iter_mut().zip(counts) {
        user.appointments_count = count;
    }
}

pub async fn load_staff_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: StaffQuery,
) -> ServiceResult<StaffPageData>
where
    R: UserReader + AppointmentReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let (sort_by, sort_order) = parse_sort(query.sort_by.as_deref(), query.sort_order.as_deref())
        .unwrap_or((UserSort::Name, SortOrder::Asc));

    let mut list_query = UserListQuery::new()
        .paginate(query.page.unwrap_or(1), DEFAULT_ITEMS_PER_PAGE)
        .sort(sort_by, sort_order)
        .search(query.search.clone().unwrap_or_default());

    if let Some(role) = query.role.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
        list_query = list_query.role(UserRole::from(role));
    }
    if let Some(is_active) = parse_filter::<bool>(query.active.as_deref()) {
        list_query = list_query.active(is_active);
    }

    let mut users = repo.list_users(list_query).await.map_err(|err| {
        log::error!("Failed to list staff: {err}");
        err
    })?;

    enrich_with_appointment_counts(repo, &mut users.items).await;

    Ok(StaffPageData {
        users: users.into(),
        roles: STAFF_ROLES,
        filters: query,
    })
}

pub async fn load_user_modal<R>(
    repo: &R,
    user: &AuthenticatedUser,
    user_id: i32,
) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    repo.get_user(UserId::new(user_id)?)
        .await?
        .ok_or(ServiceError::NotFound)
}

pub async fn create_user<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: UserForm,
) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_user = NewUser::try_from(form)?;

    let created = repo.create_user(&new_user).await.map_err(|err| {
        log::error!("Failed to add a staff member: {err}");
        err
    })?;

    Ok(created)
}

pub async fn update_user<R>(
    repo: &R,
    user: &AuthenticatedUser,
    user_id: i32,
    form: UserForm,
) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let id = UserId::new(user_id)?;
    let updates = NewUser::try_from(form)?;

    let updated = repo.update_user(id, &updates).await.map_err(|err| {
        log::error!("Failed to update staff member {id}: {err}");
        err
    })?;

    Ok(updated)
}

pub async fn toggle_user<R>(
    repo: &R,
    user: &AuthenticatedUser,
    user_id: i32,
    form: ToggleActiveForm,
) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let id = UserId::new(user_id)?;

    let updated = repo
        .set_user_active(id, form.is_active)
        .await
        .map_err(|err| {
            log::error!("Failed to toggle staff member {id}: {err}");
            err
        })?;

    Ok(updated)
}

pub async fn delete_user<R>(
    repo: &R,
    user: &AuthenticatedUser,
    user_id: i32,
) -> ServiceResult<()>
where
    R: UserWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let id = UserId::new(user_id)?;

    repo.delete_user(id).await.map_err(|err| {
        log::error!("Failed to delete staff member {id}: {err}");
        err
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fake::{
        FakeRepository, admin_user, front_desk_user, sample_appointment, sample_user,
    };

    fn staffed_repo() -> FakeRepository {
        let repo = FakeRepository::default();
        repo.users.replace(vec![
            sample_user(1, "Dr. Hart", UserRole::Veterinarian),
            sample_user(2, "Dr. Moss", UserRole::Veterinarian),
            sample_user(3, "Sam Reed", UserRole::Receptionist),
        ]);
        repo.appointments.replace(vec![
            sample_appointment(1, 1, 1, 1),
            sample_appointment(2, 1, 1, 1),
            sample_appointment(3, 2, 2, 2),
        ]);
        repo
    }

    fn counts(data: &StaffPageData) -> Vec<Option<usize>> {
        data.users
            .items
            .iter()
            .map(|user| user.appointments_count)
            .collect()
    }

    #[actix_web::test]
    async fn counts_come_from_meta_total() {
        let repo = staffed_repo();

        let data = load_staff_page(&repo, &admin_user(), StaffQuery::default())
            .await
            .unwrap();

        assert_eq!(counts(&data), vec![Some(2), Some(1), Some(0)]);
        assert_eq!(
            repo.appointment_queries.borrow().as_slice(),
            [
                "page=1&per_page=1&user_id=1",
                "page=1&per_page=1&user_id=2",
                "page=1&per_page=1&user_id=3",
            ]
        );
    }

    #[actix_web::test]
    async fn failed_count_leaves_the_user_without_one() {
        let repo = staffed_repo();
        repo.failing_users.replace(vec![UserId::new(2).unwrap()]);

        let data = load_staff_page(&repo, &admin_user(), StaffQuery::default())
            .await
            .unwrap();

        assert_eq!(counts(&data), vec![Some(2), None, Some(0)]);
    }

    #[actix_web::test]
    async fn role_filter_is_applied_before_enrichment() {
        let repo = staffed_repo();

        let data = load_staff_page(
            &repo,
            &admin_user(),
            StaffQuery {
                role: Some("receptionist".to_string()),
                ..StaffQuery::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(data.users.items.len(), 1);
        assert_eq!(repo.appointment_queries.borrow().len(), 1);
    }

    #[actix_web::test]
    async fn staff_admin_requires_admin_role() {
        let repo = staffed_repo();

        let result = load_staff_page(&repo, &front_desk_user(), StaffQuery::default()).await;
        assert!(matches!(result, Err(ServiceError::Unauthorized)));

        let result = toggle_user(
            &repo,
            &front_desk_user(),
            1,
            ToggleActiveForm { is_active: false },
        )
        .await;
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[actix_web::test]
    async fn deactivating_staff_patches_user() {
        let repo = staffed_repo();

        let user = toggle_user(&repo, &admin_user(), 3, ToggleActiveForm { is_active: false })
            .await
            .unwrap();

        assert!(!user.is_active);
        assert_eq!(
            repo.writes.borrow().as_slice(),
            ["PATCH users/3 is_active=false"]
        );
    }
}
