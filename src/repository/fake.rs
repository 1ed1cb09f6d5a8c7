//! In-memory repository backing the service tests.

use std::cell::RefCell;

use chrono::{DateTime, TimeZone, Utc};

use crate::auth::AuthenticatedUser;
use crate::domain::appointment::{
    Appointment, AppointmentStatus, NewAppointment, UpdateAppointment,
};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::pet::{NewPet, Pet, PetSex, UpdatePet};
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::service::{NewService, Service, UpdateService};
use crate::domain::types::{
    AppointmentId, ClientId, DurationMinutes, EmailAddress, PersonName, PetId, PetName, Price,
    ProductId, ProductName, ServiceId, ServiceName, Species, StockQuantity, UserId,
};
use crate::domain::user::{NewUser, UpdateUser, User, UserRole};
use crate::repository::envelope::PageMeta;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    AppointmentListQuery, AppointmentReader, AppointmentWriter, ClientListQuery, ClientReader,
    ClientWriter, ListQuery, Page, Pagination, PetListQuery, PetReader, PetWriter,
    ProductListQuery, ProductReader, ProductWriter, Relation, ServiceListQuery, ServiceReader,
    ServiceWriter, UserListQuery, UserReader, UserWriter,
};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

#[derive(Default)]
pub struct FakeRepository {
    pub appointments: RefCell<Vec<Appointment>>,
    pub clients: RefCell<Vec<Client>>,
    pub pets: RefCell<Vec<Pet>>,
    pub products: RefCell<Vec<Product>>,
    pub services: RefCell<Vec<Service>>,
    pub users: RefCell<Vec<User>>,
    /// Writer calls in the order they were made, e.g. `PATCH products/3 is_active=false`.
    pub writes: RefCell<Vec<String>>,
    /// Query strings of every `list_appointments` call.
    pub appointment_queries: RefCell<Vec<String>>,
    /// Appointment listings filtered by one of these users fail.
    pub failing_users: RefCell<Vec<UserId>>,
    /// Error returned by every writer call when set.
    pub reject_writes: RefCell<Option<RepositoryError>>,
}

pub fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap()
}

pub fn admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "1".to_string(),
        email: "admin@clinic.test".to_string(),
        name: "Admin".to_string(),
        roles: vec![
            SERVICE_ACCESS_ROLE.to_string(),
            SERVICE_ADMIN_ROLE.to_string(),
        ],
        exp: 0,
    }
}

pub fn front_desk_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "2".to_string(),
        email: "desk@clinic.test".to_string(),
        name: "Front Desk".to_string(),
        roles: vec![SERVICE_ACCESS_ROLE.to_string()],
        exp: 0,
    }
}

pub fn outsider_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "3".to_string(),
        email: "guest@example.com".to_string(),
        name: "Guest".to_string(),
        roles: vec!["crm".to_string()],
        exp: 0,
    }
}

pub fn sample_client(id: i32, first_name: &str, last_name: &str) -> Client {
    Client {
        id: ClientId::new(id).unwrap(),
        first_name: PersonName::new(first_name).unwrap(),
        last_name: PersonName::new(last_name).unwrap(),
        email: None,
        phone: None,
        address: None,
        notes: None,
        pets: None,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn sample_pet(id: i32, client_id: i32, name: &str, species: &str) -> Pet {
    Pet {
        id: PetId::new(id).unwrap(),
        client_id: ClientId::new(client_id).unwrap(),
        name: PetName::new(name).unwrap(),
        species: Species::new(species).unwrap(),
        breed: None,
        sex: PetSex::Unknown,
        date_of_birth: None,
        weight_kg: None,
        notes: None,
        client: None,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn sample_product(id: i32, name: &str, stock: i32) -> Product {
    Product {
        id: ProductId::new(id).unwrap(),
        name: ProductName::new(name).unwrap(),
        sku: None,
        category: Some("food".to_string()),
        description: None,
        price: Price::new(12.0).unwrap(),
        stock_quantity: StockQuantity::new(stock).unwrap(),
        is_active: true,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn sample_service(id: i32, name: &str, is_active: bool) -> Service {
    Service {
        id: ServiceId::new(id).unwrap(),
        name: ServiceName::new(name).unwrap(),
        description: None,
        price: Price::new(40.0).unwrap(),
        duration_minutes: DurationMinutes::new(30).unwrap(),
        is_active,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn sample_user(id: i32, name: &str, role: UserRole) -> User {
    User {
        id: UserId::new(id).unwrap(),
        name: PersonName::new(name).unwrap(),
        email: EmailAddress::new(format!("user{id}@clinic.test")).unwrap(),
        phone: None,
        role,
        is_active: true,
        appointments_count: None,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn sample_appointment(id: i32, client_id: i32, pet_id: i32, user_id: i32) -> Appointment {
    Appointment {
        id: AppointmentId::new(id).unwrap(),
        client_id: ClientId::new(client_id).unwrap(),
        pet_id: PetId::new(pet_id).unwrap(),
        service_id: ServiceId::new(1).unwrap(),
        user_id: UserId::new(user_id).unwrap(),
        scheduled_at: timestamp(),
        duration_minutes: DurationMinutes::new(30).unwrap(),
        status: AppointmentStatus::Scheduled,
        notes: None,
        client: None,
        pet: None,
        service: None,
        user: None,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

fn page_of<T>(items: Vec<T>, pagination: Option<Pagination>) -> Page<T> {
    let total = items.len();
    let Some(Pagination { page, per_page }) = pagination else {
        return Page {
            meta: PageMeta::single_page(total),
            items,
        };
    };

    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    Page {
        items,
        meta: PageMeta {
            current_page: page,
            last_page: total.div_ceil(per_page).max(1),
            per_page,
            total,
            from: None,
            to: None,
        },
    }
}

fn matches_search(search: &Option<String>, haystacks: &[&str]) -> bool {
    match search {
        Some(term) => {
            let term = term.to_lowercase();
            haystacks
                .iter()
                .any(|text| text.to_lowercase().contains(&term))
        }
        None => true,
    }
}

fn next_id(len: usize) -> i32 {
    i32::try_from(len).unwrap() + 1
}

impl FakeRepository {
    fn record(&self, call: String) -> RepositoryResult<()> {
        self.writes.borrow_mut().push(call);
        match self.reject_writes.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppointmentReader for FakeRepository {
    async fn get_appointment(
        &self,
        id: AppointmentId,
        _include: &[Relation],
    ) -> RepositoryResult<Option<Appointment>> {
        Ok(self
            .appointments
            .borrow()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn list_appointments(
        &self,
        query: AppointmentListQuery,
    ) -> RepositoryResult<Page<Appointment>> {
        self.appointment_queries
            .borrow_mut()
            .push(query.query_string());

        if let Some(user_id) = query.user_id
            && self.failing_users.borrow().contains(&user_id)
        {
            return Err(RepositoryError::BackendError("backend unavailable".to_string()));
        }

        let items = self
            .appointments
            .borrow()
            .iter()
            .filter(|a| query.status.is_none_or(|s| a.status == s))
            .filter(|a| query.client_id.is_none_or(|id| a.client_id == id))
            .filter(|a| query.pet_id.is_none_or(|id| a.pet_id == id))
            .filter(|a| query.user_id.is_none_or(|id| a.user_id == id))
            .filter(|a| query.date_from.is_none_or(|d| a.scheduled_at.date_naive() >= d))
            .filter(|a| query.date_to.is_none_or(|d| a.scheduled_at.date_naive() <= d))
            .cloned()
            .collect();

        Ok(page_of(items, query.params.pagination))
    }
}

impl AppointmentWriter for FakeRepository {
    async fn create_appointment(&self, new: &NewAppointment) -> RepositoryResult<Appointment> {
        self.record(format!("POST appointments pet={}", new.pet_id))?;
        let mut appointments = self.appointments.borrow_mut();
        let id = next_id(appointments.len());
        let appointment = Appointment {
            scheduled_at: new.scheduled_at,
            duration_minutes: new.duration_minutes,
            status: new.status,
            notes: new.notes.clone(),
            service_id: new.service_id,
            ..sample_appointment(id, new.client_id.get(), new.pet_id.get(), new.user_id.get())
        };
        appointments.push(appointment.clone());
        Ok(appointment)
    }

    async fn update_appointment(
        &self,
        id: AppointmentId,
        updates: &UpdateAppointment,
    ) -> RepositoryResult<Appointment> {
        self.record(format!("PUT appointments/{id}"))?;
        let mut appointments = self.appointments.borrow_mut();
        let appointment = appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(RepositoryError::NotFound)?;
        appointment.scheduled_at = updates.scheduled_at;
        appointment.status = updates.status;
        appointment.user_id = updates.user_id;
        Ok(appointment.clone())
    }

    async fn update_appointment_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> RepositoryResult<Appointment> {
        self.record(format!("PATCH appointments/{id} status={status}"))?;
        let mut appointments = self.appointments.borrow_mut();
        let appointment = appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(RepositoryError::NotFound)?;
        appointment.status = status;
        Ok(appointment.clone())
    }

    async fn delete_appointment(&self, id: AppointmentId) -> RepositoryResult<()> {
        self.record(format!("DELETE appointments/{id}"))?;
        self.appointments.borrow_mut().retain(|a| a.id != id);
        Ok(())
    }
}

impl ClientReader for FakeRepository {
    async fn get_client(
        &self,
        id: ClientId,
        _include: &[Relation],
    ) -> RepositoryResult<Option<Client>> {
        Ok(self.clients.borrow().iter().find(|c| c.id == id).cloned())
    }

    async fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<Page<Client>> {
        let items = self
            .clients
            .borrow()
            .iter()
            .filter(|c| {
                matches_search(
                    &query.params.search,
                    &[c.first_name.as_str(), c.last_name.as_str()],
                )
            })
            .cloned()
            .collect();
        Ok(page_of(items, query.params.pagination))
    }
}

impl ClientWriter for FakeRepository {
    async fn create_client(&self, new: &NewClient) -> RepositoryResult<Client> {
        self.record(format!("POST clients {}", new.last_name))?;
        let mut clients = self.clients.borrow_mut();
        let client = Client {
            email: new.email.clone(),
            phone: new.phone.clone(),
            ..sample_client(
                next_id(clients.len()),
                new.first_name.as_str(),
                new.last_name.as_str(),
            )
        };
        clients.push(client.clone());
        Ok(client)
    }

    async fn update_client(
        &self,
        id: ClientId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client> {
        self.record(format!("PUT clients/{id}"))?;
        let mut clients = self.clients.borrow_mut();
        let client = clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RepositoryError::NotFound)?;
        client.first_name = updates.first_name.clone();
        client.last_name = updates.last_name.clone();
        client.email = updates.email.clone();
        Ok(client.clone())
    }

    async fn delete_client(&self, id: ClientId) -> RepositoryResult<()> {
        self.record(format!("DELETE clients/{id}"))?;
        self.clients.borrow_mut().retain(|c| c.id != id);
        Ok(())
    }
}

impl PetReader for FakeRepository {
    async fn get_pet(&self, id: PetId, _include: &[Relation]) -> RepositoryResult<Option<Pet>> {
        Ok(self.pets.borrow().iter().find(|p| p.id == id).cloned())
    }

    async fn list_pets(&self, query: PetListQuery) -> RepositoryResult<Page<Pet>> {
        let items = self
            .pets
            .borrow()
            .iter()
            .filter(|p| query.client_id.is_none_or(|id| p.client_id == id))
            .filter(|p| {
                query
                    .species
                    .as_deref()
                    .is_none_or(|s| p.species.as_str() == s)
            })
            .filter(|p| matches_search(&query.params.search, &[p.name.as_str()]))
            .cloned()
            .collect();
        Ok(page_of(items, query.params.pagination))
    }
}

impl PetWriter for FakeRepository {
    async fn create_pet(&self, new: &NewPet) -> RepositoryResult<Pet> {
        self.record(format!("POST pets client={}", new.client_id))?;
        let mut pets = self.pets.borrow_mut();
        let pet = sample_pet(
            next_id(pets.len()),
            new.client_id.get(),
            new.name.as_str(),
            new.species.as_str(),
        );
        pets.push(pet.clone());
        Ok(pet)
    }

    async fn update_pet(&self, id: PetId, updates: &UpdatePet) -> RepositoryResult<Pet> {
        self.record(format!("PUT pets/{id}"))?;
        let mut pets = self.pets.borrow_mut();
        let pet = pets
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;
        pet.name = updates.name.clone();
        pet.client_id = updates.client_id;
        Ok(pet.clone())
    }

    async fn delete_pet(&self, id: PetId) -> RepositoryResult<()> {
        self.record(format!("DELETE pets/{id}"))?;
        self.pets.borrow_mut().retain(|p| p.id != id);
        Ok(())
    }
}

impl ProductReader for FakeRepository {
    async fn get_product(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        Ok(self.products.borrow().iter().find(|p| p.id == id).cloned())
    }

    async fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Page<Product>> {
        let items = self
            .products
            .borrow()
            .iter()
            .filter(|p| query.is_active.is_none_or(|active| p.is_active == active))
            .filter(|p| {
                query
                    .category
                    .as_deref()
                    .is_none_or(|c| p.category.as_deref() == Some(c))
            })
            .filter(|p| matches_search(&query.params.search, &[p.name.as_str()]))
            .cloned()
            .collect();
        Ok(page_of(items, query.params.pagination))
    }
}

impl ProductWriter for FakeRepository {
    async fn create_product(&self, new: &NewProduct) -> RepositoryResult<Product> {
        self.record(format!("POST products {}", new.name))?;
        let mut products = self.products.borrow_mut();
        let product = Product {
            price: new.price,
            is_active: new.is_active,
            ..sample_product(
                next_id(products.len()),
                new.name.as_str(),
                new.stock_quantity.get(),
            )
        };
        products.push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: ProductId,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product> {
        self.record(format!("PUT products/{id}"))?;
        let mut products = self.products.borrow_mut();
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;
        product.name = updates.name.clone();
        product.price = updates.price;
        product.stock_quantity = updates.stock_quantity;
        Ok(product.clone())
    }

    async fn set_product_active(
        &self,
        id: ProductId,
        is_active: bool,
    ) -> RepositoryResult<Product> {
        self.record(format!("PATCH products/{id} is_active={is_active}"))?;
        let mut products = self.products.borrow_mut();
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;
        product.is_active = is_active;
        Ok(product.clone())
    }

    async fn delete_product(&self, id: ProductId) -> RepositoryResult<()> {
        self.record(format!("DELETE products/{id}"))?;
        self.products.borrow_mut().retain(|p| p.id != id);
        Ok(())
    }
}

impl ServiceReader for FakeRepository {
    async fn get_service(&self, id: ServiceId) -> RepositoryResult<Option<Service>> {
        Ok(self.services.borrow().iter().find(|s| s.id == id).cloned())
    }

    async fn list_services(&self, query: ServiceListQuery) -> RepositoryResult<Page<Service>> {
        let items = self
            .services
            .borrow()
            .iter()
            .filter(|s| query.is_active.is_none_or(|active| s.is_active == active))
            .filter(|s| matches_search(&query.params.search, &[s.name.as_str()]))
            .cloned()
            .collect();
        Ok(page_of(items, query.params.pagination))
    }
}

impl ServiceWriter for FakeRepository {
    async fn create_service(&self, new: &NewService) -> RepositoryResult<Service> {
        self.record(format!("POST services {}", new.name))?;
        let mut services = self.services.borrow_mut();
        let service = Service {
            price: new.price,
            duration_minutes: new.duration_minutes,
            ..sample_service(next_id(services.len()), new.name.as_str(), new.is_active)
        };
        services.push(service.clone());
        Ok(service)
    }

    async fn update_service(
        &self,
        id: ServiceId,
        updates: &UpdateService,
    ) -> RepositoryResult<Service> {
        self.record(format!("PUT services/{id}"))?;
        let mut services = self.services.borrow_mut();
        let service = services
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(RepositoryError::NotFound)?;
        service.name = updates.name.clone();
        service.duration_minutes = updates.duration_minutes;
        Ok(service.clone())
    }

    async fn set_service_active(
        &self,
        id: ServiceId,
        is_active: bool,
    ) -> RepositoryResult<Service> {
        self.record(format!("PATCH services/{id} is_active={is_active}"))?;
        let mut services = self.services.borrow_mut();
        let service = services
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(RepositoryError::NotFound)?;
        service.is_active = is_active;
        Ok(service.clone())
    }

    async fn delete_service(&self, id: ServiceId) -> RepositoryResult<()> {
        self.record(format!("DELETE services/{id}"))?;
        self.services.borrow_mut().retain(|s| s.id != id);
        Ok(())
    }
}

impl UserReader for FakeRepository {
    async fn get_user(&self, id: UserId) -> RepositoryResult<Option<User>> {
        Ok(self.users.borrow().iter().find(|u| u.id == id).cloned())
    }

    async fn list_users(&self, query: UserListQuery) -> RepositoryResult<Page<User>> {
        let items = self
            .users
            .borrow()
            .iter()
            .filter(|u| query.role.as_ref().is_none_or(|role| &u.role == role))
            .filter(|u| query.is_active.is_none_or(|active| u.is_active == active))
            .filter(|u| matches_search(&query.params.search, &[u.name.as_str()]))
            .cloned()
            .collect();
        Ok(page_of(items, query.params.pagination))
    }
}

impl UserWriter for FakeRepository {
    async fn create_user(&self, new: &NewUser) -> RepositoryResult<User> {
        self.record(format!("POST users {}", new.email))?;
        let mut users = self.users.borrow_mut();
        let user = User {
            email: new.email.clone(),
            is_active: new.is_active,
            ..sample_user(next_id(users.len()), new.name.as_str(), new.role.clone())
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: UserId, updates: &UpdateUser) -> RepositoryResult<User> {
        self.record(format!("PUT users/{id}"))?;
        let mut users = self.users.borrow_mut();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(RepositoryError::NotFound)?;
        user.name = updates.name.clone();
        user.role = updates.role.clone();
        Ok(user.clone())
    }

    async fn set_user_active(&self, id: UserId, is_active: bool) -> RepositoryResult<User> {
        self.record(format!("PATCH users/{id} is_active={is_active}"))?;
        let mut users = self.users.borrow_mut();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(RepositoryError::NotFound)?;
        user.is_active = is_active;
        Ok(user.clone())
    }

    async fn delete_user(&self, id: UserId) -> RepositoryResult<()> {
        self.record(format!("DELETE users/{id}"))?;
        self.users.borrow_mut().retain(|u| u.id != id);
        Ok(())
    }
}
