use std::collections::HashMap;

use crate::models::{LeadSource, ServiceType};

// ---------------------------------------------------------------------------
// Entity resolver — name-to-id catalogs with lazy creation
// ---------------------------------------------------------------------------

/// Working catalogs for one import. Seeded from the caller's snapshots
/// (cloned, never mutated in place) and grown as rows mention names the
/// catalogs have not seen. The dedup key is the case-insensitive name; ids
/// are minted from a monotonic counter so repeated imports are reproducible.
pub struct EntityResolver {
    service_types: Vec<ServiceType>,
    lead_sources: Vec<LeadSource>,
    service_ids: HashMap<String, String>,
    source_ids: HashMap<String, String>,
    next_service: u64,
    next_source: u64,
}

impl EntityResolver {
    pub fn new(service_types: &[ServiceType], lead_sources: &[LeadSource]) -> Self {
        let mut service_ids = HashMap::new();
        for s in service_types {
            service_ids
                .entry(s.name.trim().to_lowercase())
                .or_insert_with(|| s.id.clone());
        }
        let mut source_ids = HashMap::new();
        for s in lead_sources {
            source_ids
                .entry(s.name.trim().to_lowercase())
                .or_insert_with(|| s.id.clone());
        }
        EntityResolver {
            service_types: service_types.to_vec(),
            lead_sources: lead_sources.to_vec(),
            service_ids,
            source_ids,
            next_service: 0,
            next_source: 0,
        }
    }

    /// Look up or create a service type by name. An empty name falls back
    /// to the first catalog entry, or to a synthesized "General Service"
    /// when the catalog is empty, so a booking never ends up without one.
    pub fn service_type_id(&mut self, name: &str) -> String {
        let name = name.trim();
        if name.is_empty() {
            return self.fallback_service_id();
        }
        let key = name.to_lowercase();
        if let Some(id) = self.service_ids.get(&key) {
            return id.clone();
        }
        let id = self.mint_service_id();
        self.service_types.push(ServiceType {
            id: id.clone(),
            name: name.to_string(),
            description: "Added automatically during report import".to_string(),
            is_custom: true,
        });
        self.service_ids.insert(key, id.clone());
        id
    }

    /// Look up or create a lead source by name. Same fallback contract as
    /// `service_type_id`, with "Direct" as the stock default.
    pub fn lead_source_id(&mut self, name: &str) -> String {
        let name = name.trim();
        if name.is_empty() {
            return self.fallback_source_id();
        }
        let key = name.to_lowercase();
        if let Some(id) = self.source_ids.get(&key) {
            return id.clone();
        }
        let id = self.mint_source_id();
        self.lead_sources.push(LeadSource {
            id: id.clone(),
            name: name.to_string(),
            description: "Added automatically during report import".to_string(),
            is_custom: true,
        });
        self.source_ids.insert(key, id.clone());
        id
    }

    fn fallback_service_id(&mut self) -> String {
        if let Some(first) = self.service_types.first() {
            return first.id.clone();
        }
        let id = self.mint_service_id();
        self.service_types.push(ServiceType {
            id: id.clone(),
            name: "General Service".to_string(),
            description: "Default service type".to_string(),
            is_custom: false,
        });
        self.service_ids.insert("general service".to_string(), id.clone());
        id
    }

    fn fallback_source_id(&mut self) -> String {
        if let Some(first) = self.lead_sources.first() {
            return first.id.clone();
        }
        let id = self.mint_source_id();
        self.lead_sources.push(LeadSource {
            id: id.clone(),
            name: "Direct".to_string(),
            description: "Default lead source".to_string(),
            is_custom: false,
        });
        self.source_ids.insert("direct".to_string(), id.clone());
        id
    }

    fn mint_service_id(&mut self) -> String {
        loop {
            self.next_service += 1;
            let id = format!("svc-{}", self.next_service);
            if !self.service_types.iter().any(|s| s.id == id) {
                return id;
            }
        }
    }

    fn mint_source_id(&mut self) -> String {
        loop {
            self.next_source += 1;
            let id = format!("src-{}", self.next_source);
            if !self.lead_sources.iter().any(|s| s.id == id) {
                return id;
            }
        }
    }

    /// Hand back the working catalogs, supersets of the seeds.
    pub fn into_catalogs(self) -> (Vec<ServiceType>, Vec<LeadSource>) {
        (self.service_types, self.lead_sources)
    }
}
