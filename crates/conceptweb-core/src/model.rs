use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// A labeled topic node weighted by how often it is mentioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub key: String,
    pub mentions: u32,
    pub color: Option<String>,
}

impl Concept {
    pub fn new(key: impl Into<String>, mentions: u32) -> Self {
        Self {
            key: key.into(),
            mentions,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Label shown inside the bubble: one word per line.
    pub fn display_name(&self) -> String {
        self.key.replace('_', "\n")
    }
}

/// A directed, weighted relation between two concepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    pub strength: u32,
}

/// Hub selection used when patching concepts that ended up without any link.
#[derive(Debug, Clone)]
pub struct HubRule {
    /// `(name fragments, hub key)` pairs, checked in order.
    pub routes: Vec<(Vec<String>, String)>,
    pub fallback: String,
    pub outgoing_strength: u32,
    pub incoming_strength: u32,
}

impl Default for HubRule {
    fn default() -> Self {
        let route = |fragments: &[&str], hub: &str| {
            (
                fragments.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
                hub.to_string(),
            )
        };
        Self {
            routes: vec![
                route(&["theory", "probability"], "probability_theory"),
                route(&["model", "stat"], "statistical_modeling"),
                route(&["data", "analysis"], "data_analysis"),
            ],
            fallback: "machine_learning".to_string(),
            outgoing_strength: 5,
            incoming_strength: 3,
        }
    }
}

impl HubRule {
    pub fn hub_for<'a>(&'a self, key: &str) -> &'a str {
        self.routes
            .iter()
            .find(|(fragments, _)| fragments.iter().any(|f| key.contains(f.as_str())))
            .map(|(_, hub)| hub.as_str())
            .unwrap_or(self.fallback.as_str())
    }
}

/// Concepts plus their directed links, both kept in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConceptGraph {
    concepts: IndexMap<String, Concept>,
    links: IndexMap<String, IndexMap<String, u32>>,
}

impl ConceptGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_concepts(concepts: impl IntoIterator<Item = Concept>) -> Self {
        let mut graph = Self::new();
        for c in concepts {
            graph.insert_concept(c);
        }
        graph
    }

    /// Inserts or replaces a concept. Replacing keeps the original position.
    pub fn insert_concept(&mut self, concept: Concept) {
        self.concepts.insert(concept.key.clone(), concept);
    }

    pub fn concept(&self, key: &str) -> Option<&Concept> {
        self.concepts.get(key)
    }

    pub fn concept_mut(&mut self, key: &str) -> Option<&mut Concept> {
        self.concepts.get_mut(key)
    }

    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.values()
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Stores `source -> target` unless either endpoint is unknown.
    ///
    /// Re-inserting an existing pair overwrites its strength in place.
    pub fn insert_link(&mut self, source: &str, target: &str, strength: u32) -> bool {
        if !self.concepts.contains_key(source) || !self.concepts.contains_key(target) {
            tracing::debug!(source, target, "dropping link with unknown endpoint");
            return false;
        }
        self.links
            .entry(source.to_string())
            .or_default()
            .insert(target.to_string(), strength);
        true
    }

    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        self.links.iter().flat_map(|(source, targets)| {
            targets.iter().map(move |(target, strength)| Link {
                source: source.clone(),
                target: target.clone(),
                strength: *strength,
            })
        })
    }

    pub fn strength(&self, source: &str, target: &str) -> Option<u32> {
        self.links.get(source)?.get(target).copied()
    }

    pub fn link_count(&self) -> usize {
        self.links.values().map(IndexMap::len).sum()
    }

    pub fn max_mentions(&self) -> Option<u32> {
        self.concepts.values().map(|c| c.mentions).max()
    }

    pub fn max_link_strength(&self) -> Option<u32> {
        self.links.values().flat_map(|t| t.values().copied()).max()
    }

    /// Concepts that take part in no link, in insertion order.
    pub fn isolated_concepts(&self) -> Vec<&str> {
        let mut connected: IndexSet<&str> = IndexSet::new();
        for (source, targets) in &self.links {
            if targets.is_empty() {
                continue;
            }
            connected.insert(source.as_str());
            connected.extend(targets.keys().map(String::as_str));
        }
        self.concepts
            .keys()
            .map(String::as_str)
            .filter(|k| !connected.contains(k))
            .collect()
    }

    /// Links every isolated concept to a hub in both directions. Returns how many were patched.
    pub fn connect_isolated(&mut self, rule: &HubRule) -> usize {
        let isolated: Vec<String> = self
            .isolated_concepts()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut patched = 0usize;
        for key in isolated {
            let hub = rule.hub_for(&key).to_string();
            if hub == key || !self.concepts.contains_key(&hub) {
                tracing::debug!(concept = %key, hub = %hub, "no usable hub for isolated concept");
                continue;
            }
            self.insert_link(&key, &hub, rule.outgoing_strength);
            self.insert_link(&hub, &key, rule.incoming_strength);
            tracing::debug!(concept = %key, hub = %hub, "connected isolated concept");
            patched += 1;
        }
        patched
    }
}
