//! Application records (tsuru `MiniApp` shape).

use serde::Deserialize;

/// One (router, address) binding of an app.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouterBinding {
    pub router: String,
    pub address: String,
}

impl RouterBinding {
    pub fn new(router: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            router: router.into(),
            address: address.into(),
        }
    }
}

/// A deployed application, keyed by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "MiniApp")]
pub struct AppRecord {
    pub name: String,
    pub team_owner: String,
    pub pool: String,
    pub plan: String,
    /// Router bindings in upstream order. May contain repeats.
    pub routers: Vec<RouterBinding>,
    pub cnames: Vec<String>,
    /// One entry per unit: the unit's process name.
    pub units: Vec<String>,
}

impl AppRecord {
    /// Minimal record with only ownership fields set.
    pub fn new(
        name: impl Into<String>,
        team_owner: impl Into<String>,
        pool: impl Into<String>,
        plan: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            team_owner: team_owner.into(),
            pool: pool.into(),
            plan: plan.into(),
            routers: Vec::new(),
            cnames: Vec::new(),
            units: Vec::new(),
        }
    }

    pub fn with_router(mut self, router: impl Into<String>, address: impl Into<String>) -> Self {
        self.routers.push(RouterBinding::new(router, address));
        self
    }

    pub fn with_cname(mut self, cname: impl Into<String>) -> Self {
        self.cnames.push(cname.into());
        self
    }

    pub fn with_unit(mut self, process: impl Into<String>) -> Self {
        self.units.push(process.into());
        self
    }
}

// --------------------
// Wire shape
// --------------------
#[derive(Debug, Default, Deserialize)]
struct MiniApp {
    #[serde(default)]
    name: String,
    #[serde(default, alias = "teamOwner", alias = "team_owner")]
    teamowner: String,
    #[serde(default)]
    pool: String,
    #[serde(default)]
    plan: Option<Plan>,
    #[serde(default)]
    routers: Option<Vec<AppRouter>>,
    #[serde(default)]
    cname: Option<Vec<String>>,
    #[serde(default)]
    units: Option<Vec<Unit>>,
}

#[derive(Debug, Default, Deserialize)]
struct Plan {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct AppRouter {
    #[serde(default)]
    name: String,
    #[serde(default)]
    address: String,
}

#[derive(Debug, Default, Deserialize)]
struct Unit {
    #[serde(default, alias = "ProcessName", alias = "processName")]
    processname: String,
}

impl From<MiniApp> for AppRecord {
    fn from(w: MiniApp) -> Self {
        Self {
            name: w.name,
            team_owner: w.teamowner,
            pool: w.pool,
            plan: w.plan.map(|p| p.name).unwrap_or_default(),
            routers: w
                .routers
                .unwrap_or_default()
                .into_iter()
                .map(|r| RouterBinding::new(r.name, r.address))
                .collect(),
            cnames: w.cname.unwrap_or_default(),
            units: w
                .units
                .unwrap_or_default()
                .into_iter()
                .map(|u| u.processname)
                .collect(),
        }
    }
}
