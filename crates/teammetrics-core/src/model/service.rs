//! Service instance records and the service listing shape.
//!
//! A listing entry either names its instances (each needs a detail call) or
//! already carries full instance records, depending on the tsuru API version.

use serde::Deserialize;

/// Upstream detail fields of one service instance.
///
/// Accepts both the detail endpoint spelling (`teamowner`, `planname`) and
/// the listing spelling (`team_owner`, `plan_name`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceInstanceInfo {
    #[serde(default, rename = "teamowner", alias = "team_owner")]
    pub team_owner: String,
    #[serde(default)]
    pub pool: String,
    #[serde(default, rename = "planname", alias = "plan_name")]
    pub plan: String,
    /// Names of bound applications.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub apps: Vec<String>,
}

/// A service instance keyed by (service, instance).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInstanceRecord {
    pub service: String,
    pub instance: String,
    pub info: ServiceInstanceInfo,
}

impl ServiceInstanceRecord {
    pub fn new(
        service: impl Into<String>,
        instance: impl Into<String>,
        info: ServiceInstanceInfo,
    ) -> Self {
        Self {
            service: service.into(),
            instance: instance.into(),
            info,
        }
    }

    /// Composite key.
    pub fn key(&self) -> (&str, &str) {
        (&self.service, &self.instance)
    }

    /// Whether the required detail fields were populated.
    ///
    /// A missing team owner means the instance never got its detail (or the
    /// upstream returned a degraded body); such records are not published.
    pub fn is_complete(&self) -> bool {
        !self.info.team_owner.is_empty()
    }
}

/// Instances of one service, as returned by the listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceListing {
    /// Only names: each instance needs a detail call.
    Names(Vec<String>),
    /// Full records: no detail call needed.
    Records(Vec<ServiceInstanceRecord>),
}

impl InstanceListing {
    pub fn len(&self) -> usize {
        match self {
            InstanceListing::Names(v) => v.len(),
            InstanceListing::Records(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One entry of the service listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ServiceInstancesWire")]
pub struct ServiceListing {
    pub service: String,
    pub instances: InstanceListing,
}

impl ServiceListing {
    pub fn names(service: impl Into<String>, names: Vec<String>) -> Self {
        Self {
            service: service.into(),
            instances: InstanceListing::Names(names),
        }
    }

    pub fn records(service: impl Into<String>, records: Vec<ServiceInstanceRecord>) -> Self {
        Self {
            service: service.into(),
            instances: InstanceListing::Records(records),
        }
    }
}

// --------------------
// Wire shapes
// --------------------
#[derive(Debug, Deserialize)]
struct ServiceInstancesWire {
    #[serde(default)]
    service: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    instances: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    service_instances: Vec<ServiceInstanceWire>,
}

#[derive(Debug, Deserialize)]
struct ServiceInstanceWire {
    #[serde(default)]
    name: String,
    #[serde(default)]
    service_name: String,
    #[serde(flatten)]
    info: ServiceInstanceInfo,
}

impl From<ServiceInstancesWire> for ServiceListing {
    fn from(w: ServiceInstancesWire) -> Self {
        if w.service_instances.is_empty() {
            return ServiceListing::names(w.service, w.instances);
        }
        let records = w
            .service_instances
            .into_iter()
            .map(|si| {
                let service = if si.service_name.is_empty() {
                    w.service.clone()
                } else {
                    si.service_name
                };
                ServiceInstanceRecord::new(service, si.name, si.info)
            })
            .collect();
        ServiceListing::records(w.service, records)
    }
}

fn null_as_empty<'de, D, T>(de: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    let v: Option<Vec<T>> = Option::deserialize(de)?;
    Ok(v.unwrap_or_default())
}
