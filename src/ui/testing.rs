//! In-memory page for exercising the flows without a document.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use super::port::{Field, Region, Trigger, UiPort};

#[derive(Clone, Debug, PartialEq)]
pub enum Painted {
    Html(String),
    Text(String),
}

pub struct MemoryPort {
    fields: HashMap<Field, String>,
    regions: HashSet<Region>,
    triggers: HashSet<Trigger>,
    painted: RefCell<HashMap<Region, Painted>>,
    history: RefCell<Vec<(Region, Painted)>>,
}

impl MemoryPort {
    /// A page with every region and trigger present and no field values.
    pub fn full() -> Self {
        Self {
            fields: HashMap::new(),
            regions: [
                Region::CropsView,
                Region::CropsRaw,
                Region::RecommendRaw,
                Region::RecommendTable,
                Region::Diagnosis,
            ]
            .into_iter()
            .collect(),
            triggers: Trigger::ALL.into_iter().collect(),
            painted: RefCell::new(HashMap::new()),
            history: RefCell::new(Vec::new()),
        }
    }

    pub fn with_field(mut self, field: Field, value: &str) -> Self {
        self.fields.insert(field, value.to_string());
        self
    }

    pub fn without_region(mut self, region: Region) -> Self {
        self.regions.remove(&region);
        self
    }

    pub fn without_trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.remove(&trigger);
        self
    }

    pub fn painted(&self, region: Region) -> Option<Painted> {
        self.painted.borrow().get(&region).cloned()
    }

    pub fn html(&self, region: Region) -> String {
        match self.painted(region) {
            Some(Painted::Html(html)) => html,
            other => panic!("expected HTML in {region:?}, found {other:?}"),
        }
    }

    pub fn text(&self, region: Region) -> String {
        match self.painted(region) {
            Some(Painted::Text(text)) => text,
            other => panic!("expected text in {region:?}, found {other:?}"),
        }
    }

    /// Every write in order, including the loading placeholders.
    pub fn history(&self) -> Vec<(Region, Painted)> {
        self.history.borrow().clone()
    }

    fn paint(&self, region: Region, content: Painted) {
        assert!(
            self.regions.contains(&region),
            "wrote to missing region {region:?}"
        );
        self.history.borrow_mut().push((region, content.clone()));
        self.painted.borrow_mut().insert(region, content);
    }
}

impl UiPort for MemoryPort {
    fn field_value(&self, field: Field) -> Option<String> {
        self.fields.get(&field).cloned()
    }

    fn has_region(&self, region: Region) -> bool {
        self.regions.contains(&region)
    }

    fn set_html(&self, region: Region, html: String) {
        self.paint(region, Painted::Html(html));
    }

    fn set_text(&self, region: Region, text: String) {
        self.paint(region, Painted::Text(text));
    }

    fn has_trigger(&self, trigger: Trigger) -> bool {
        self.triggers.contains(&trigger)
    }
}
