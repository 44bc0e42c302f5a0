pub mod http;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use shared_models::{Collection, Person, PersonId, Resource};

pub use http::HttpGateway;

/// CRUD contract of the dashboard backend. Resource names are routed verbatim.
#[async_trait]
pub trait ApiGateway: Send + Sync {
    async fn load_all(&self, resource: Resource) -> Result<Collection<Person>>;

    /// Records owned by `id` under `resource` (vital signs, plans, assigned patients).
    /// Left undecoded; callers know the element type.
    async fn load_all_by_id(&self, resource: Resource, id: PersonId) -> Result<Vec<Value>>;

    async fn create(&self, resource: Resource, data: Value) -> Result<Person>;

    async fn create_by_id(&self, resource: Resource, id: PersonId, data: Value) -> Result<Value>;

    async fn update(&self, resource: Resource, id: PersonId, data: Value) -> Result<Person>;

    async fn remove(&self, resource: Resource, id: PersonId) -> Result<()>;
}
