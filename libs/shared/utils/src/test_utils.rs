use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_gateway::ApiGateway;
use shared_models::{Collection, Person, PersonId, PersonStatus, Resource, Role};

use crate::notify::{Notification, NotificationLevel, Notifier};

pub struct TestConfig {
    pub api_base_url: String,
    pub api_token: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            api_token: Some("test-token".to_string()),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            api_base_url: self.api_base_url.clone(),
            api_token: self.api_token.clone(),
            request_timeout_secs: 5,
        }
    }
}

pub struct MockGatewayResponses;

impl MockGatewayResponses {
    pub fn person(id: PersonId, full_name: &str, role: Role, status: Option<PersonStatus>) -> Person {
        let email = format!(
            "{}@example.com",
            full_name.to_lowercase().replace(' ', ".")
        );
        let mut person = Person::new(role, full_name, email).with_id(id);
        person.status = status;
        person
    }

    pub fn patient(id: PersonId, full_name: &str, status: PersonStatus) -> Person {
        Self::person(id, full_name, Role::Patient, Some(status))
    }

    pub fn doctor(id: PersonId, full_name: &str, status: PersonStatus) -> Person {
        Self::person(id, full_name, Role::Doctor, Some(status))
    }

    pub fn vital_sign_response(pain_level: u8, is_emergency: bool) -> Value {
        json!({
            "timestamp": "2024-03-01T09:30:00Z",
            "temperature": 36.8,
            "heartRate": 72,
            "systolic": 120,
            "diastolic": 80,
            "painLevel": pain_level,
            "description": "Routine observation",
            "isEmergency": is_emergency
        })
    }

    pub fn recovery_plan_response(plan: &str, progress_note: Option<&str>) -> Value {
        json!({
            "dateAssigned": "2024-02-20T08:00:00Z",
            "dateUpdated": "2024-03-02T08:00:00Z",
            "plan": plan,
            "progressNote": progress_note
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    LoadAll(Resource),
    LoadAllById(Resource, PersonId),
    Create(Resource, Value),
    CreateById(Resource, PersonId, Value),
    Update(Resource, PersonId, Value),
    Remove(Resource, PersonId),
}

/// Gateway double backed by in-process maps. Records every call it receives.
pub struct InMemoryGateway {
    collections: Mutex<HashMap<Resource, Vec<Person>>>,
    owned: Mutex<HashMap<(Resource, PersonId), Vec<Value>>>,
    failing: Mutex<HashSet<Resource>>,
    calls: Mutex<Vec<GatewayCall>>,
    next_id: AtomicI64,
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
            owned: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1000),
        }
    }
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(self, resource: Resource, items: Vec<Person>) -> Self {
        self.collections
            .lock()
            .expect("collections lock poisoned")
            .insert(resource, items);
        self
    }

    pub fn with_records(self, resource: Resource, id: PersonId, records: Vec<Value>) -> Self {
        self.owned
            .lock()
            .expect("records lock poisoned")
            .insert((resource, id), records);
        self
    }

    /// Every subsequent call touching `resource` fails with a 500-style error.
    pub fn fail_on(&self, resource: Resource) {
        self.failing.lock().expect("failing lock poisoned").insert(resource);
    }

    pub fn recover(&self, resource: Resource) {
        self.failing.lock().expect("failing lock poisoned").remove(&resource);
    }

    pub fn set_collection(&self, resource: Resource, items: Vec<Person>) {
        self.collections
            .lock()
            .expect("collections lock poisoned")
            .insert(resource, items);
    }

    pub fn collection(&self, resource: Resource) -> Vec<Person> {
        self.collections
            .lock()
            .expect("collections lock poisoned")
            .get(&resource)
            .cloned()
            .unwrap_or_default()
    }

    pub fn records(&self, resource: Resource, id: PersonId) -> Vec<Value> {
        self.owned
            .lock()
            .expect("records lock poisoned")
            .get(&(resource, id))
            .cloned()
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock poisoned").len()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().expect("calls lock poisoned").push(call);
    }

    fn check(&self, resource: Resource) -> Result<()> {
        if self.failing.lock().expect("failing lock poisoned").contains(&resource) {
            bail!("API error (500 Internal Server Error): simulated failure on {}", resource);
        }
        Ok(())
    }
}

#[async_trait]
impl ApiGateway for InMemoryGateway {
    async fn load_all(&self, resource: Resource) -> Result<Collection<Person>> {
        self.record(GatewayCall::LoadAll(resource));
        self.check(resource)?;
        Ok(Collection::new(self.collection(resource)))
    }

    async fn load_all_by_id(&self, resource: Resource, id: PersonId) -> Result<Vec<Value>> {
        self.record(GatewayCall::LoadAllById(resource, id));
        self.check(resource)?;
        Ok(self.records(resource, id))
    }

    async fn create(&self, resource: Resource, data: Value) -> Result<Person> {
        self.record(GatewayCall::Create(resource, data.clone()));
        self.check(resource)?;

        let mut person: Person = serde_json::from_value(data)?;
        person.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.collections
            .lock()
            .expect("collections lock poisoned")
            .entry(resource)
            .or_default()
            .push(person.clone());
        Ok(person)
    }

    async fn create_by_id(&self, resource: Resource, id: PersonId, data: Value) -> Result<Value> {
        self.record(GatewayCall::CreateById(resource, id, data.clone()));
        self.check(resource)?;

        self.owned
            .lock()
            .expect("records lock poisoned")
            .entry((resource, id))
            .or_default()
            .push(data.clone());
        Ok(data)
    }

    async fn update(&self, resource: Resource, id: PersonId, data: Value) -> Result<Person> {
        self.record(GatewayCall::Update(resource, id, data.clone()));
        self.check(resource)?;

        let mut collections = self.collections.lock().expect("collections lock poisoned");
        let Some(existing) = collections
            .get_mut(&resource)
            .and_then(|items| items.iter_mut().find(|p| p.id == Some(id)))
        else {
            bail!("Resource not found: {} {}", resource, id);
        };

        let mut merged = serde_json::to_value(&*existing)?;
        if let (Some(target), Value::Object(changes)) = (merged.as_object_mut(), data) {
            target.extend(changes);
        }
        *existing = serde_json::from_value(merged)?;
        Ok(existing.clone())
    }

    async fn remove(&self, resource: Resource, id: PersonId) -> Result<()> {
        self.record(GatewayCall::Remove(resource, id));
        self.check(resource)?;

        if let Some(items) = self
            .collections
            .lock()
            .expect("collections lock poisoned")
            .get_mut(&resource)
        {
            items.retain(|p| p.id != Some(id));
        }
        Ok(())
    }
}

/// Notifier that keeps everything it was sent, for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.sent.lock().expect("notifier lock poisoned").clone()
    }

    pub fn messages(&self, level: NotificationLevel) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|n| n.level == level)
            .map(|n| n.message)
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.messages(NotificationLevel::Success)
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(NotificationLevel::Error)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().expect("notifier lock poisoned").push(notification);
    }
}
