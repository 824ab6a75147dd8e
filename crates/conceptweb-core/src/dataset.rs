//! Built-in concept weights, connections, colors and chapter markers.

use crate::error::{Error, Result};
use crate::model::{Concept, ConceptGraph, HubRule};
use crate::xref::Chapter;
use std::str::FromStr;

/// Fill used for concepts without a palette entry.
pub const DEFAULT_CONCEPT_COLOR: &str = "#B0B0B0";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NetworkVariant {
    #[default]
    Final,
    Enhanced,
}

impl NetworkVariant {
    pub fn output_stem(self) -> &'static str {
        match self {
            Self::Final => "final_concept_network",
            Self::Enhanced => "enhanced_concept_network",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Final => "final",
            Self::Enhanced => "enhanced",
        }
    }
}

impl FromStr for NetworkVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "final" => Ok(Self::Final),
            "enhanced" => Ok(Self::Enhanced),
            other => Err(Error::UnknownVariant {
                name: other.to_string(),
            }),
        }
    }
}

const FINAL_CONCEPTS: &[(&str, u32)] = &[
    ("probability_theory", 379),
    ("statistical_modeling", 343),
    ("data_analysis", 274),
    ("parameter_estimation", 272),
    ("multivariate_analysis", 238),
    ("parametric_methods", 194),
    ("information_theory", 142),
    ("scaling_laws", 128),
    ("time_series_analysis", 109),
    ("network_analysis", 107),
    ("model_validation", 94),
    ("causal_inference", 76),
    ("correlation_analysis", 70),
    ("nonparametric_methods", 41),
    ("machine_learning", 85),
    ("extreme_value_theory", 65),
    ("bayesian_methods", 55),
    ("optimization_methods", 45),
    ("dimensionality_reduction", 35),
    ("clustering_methods", 30),
    ("robust_statistics", 25),
    ("spectral_analysis", 20),
    ("neural_networks", 15),
    ("financial_modeling", 12),
    ("univariate", 43),
];

// Single-word mention counts as first extracted from the text.
const SINGLE_WORD_COUNTS: &[(&str, u32)] = &[
    ("probability", 379),
    ("modeling", 343),
    ("data", 274),
    ("estimation", 272),
    ("multivariate", 238),
    ("parametric", 194),
    ("entropy", 142),
    ("scaling", 128),
    ("time_series", 109),
    ("network", 107),
    ("validation", 94),
    ("causation", 76),
    ("dependence", 70),
    ("univariate", 43),
    ("nonparametric", 41),
];

const MULTI_WORD_KEYS: &[(&str, &str)] = &[
    ("probability", "probability_theory"),
    ("modeling", "statistical_modeling"),
    ("data", "data_analysis"),
    ("estimation", "parameter_estimation"),
    ("multivariate", "multivariate_analysis"),
    ("parametric", "parametric_methods"),
    ("entropy", "information_theory"),
    ("scaling", "scaling_laws"),
    ("time_series", "time_series_analysis"),
    ("network", "network_analysis"),
    ("validation", "model_validation"),
    ("causation", "causal_inference"),
    ("dependence", "correlation_analysis"),
    ("nonparametric", "nonparametric_methods"),
];

const ADDITIONAL_CONCEPTS: &[(&str, u32)] = &[
    ("machine_learning", 85),
    ("extreme_value_theory", 65),
    ("bayesian_methods", 55),
    ("optimization_methods", 45),
    ("dimensionality_reduction", 35),
    ("clustering_methods", 30),
    ("robust_statistics", 25),
    ("spectral_analysis", 20),
    ("neural_networks", 15),
    ("financial_modeling", 12),
];

const CONNECTIONS: &[(&str, &str, u32)] = &[
    // probability core
    ("data_analysis", "probability_theory", 35),
    ("statistical_modeling", "probability_theory", 38),
    ("probability_theory", "parameter_estimation", 35),
    ("multivariate_analysis", "probability_theory", 30),
    ("parametric_methods", "probability_theory", 24),
    ("nonparametric_methods", "probability_theory", 18),
    // machine learning
    ("data_analysis", "machine_learning", 28),
    ("machine_learning", "statistical_modeling", 22),
    ("machine_learning", "parameter_estimation", 20),
    ("machine_learning", "model_validation", 18),
    ("machine_learning", "optimization_methods", 16),
    ("machine_learning", "neural_networks", 15),
    ("machine_learning", "clustering_methods", 12),
    // statistical modeling
    ("statistical_modeling", "parameter_estimation", 25),
    ("statistical_modeling", "model_validation", 22),
    ("statistical_modeling", "parametric_methods", 20),
    ("statistical_modeling", "nonparametric_methods", 15),
    ("statistical_modeling", "bayesian_methods", 18),
    // data analysis
    ("data_analysis", "multivariate_analysis", 26),
    ("data_analysis", "correlation_analysis", 20),
    ("data_analysis", "time_series_analysis", 18),
    ("data_analysis", "dimensionality_reduction", 15),
    ("data_analysis", "robust_statistics", 12),
    // multivariate
    ("multivariate_analysis", "correlation_analysis", 22),
    ("multivariate_analysis", "dimensionality_reduction", 18),
    ("multivariate_analysis", "clustering_methods", 16),
    ("multivariate_analysis", "parametric_methods", 15),
    // information theory and networks
    ("information_theory", "network_analysis", 18),
    ("information_theory", "probability_theory", 20),
    ("information_theory", "causal_inference", 15),
    ("network_analysis", "causal_inference", 12),
    ("network_analysis", "spectral_analysis", 10),
    ("network_analysis", "clustering_methods", 8),
    // time series and causality
    ("time_series_analysis", "causal_inference", 15),
    ("time_series_analysis", "probability_theory", 18),
    ("time_series_analysis", "scaling_laws", 12),
    ("time_series_analysis", "financial_modeling", 8),
    // parameter estimation
    ("parameter_estimation", "bayesian_methods", 18),
    ("parameter_estimation", "optimization_methods", 16),
    ("parameter_estimation", "model_validation", 20),
    ("parameter_estimation", "robust_statistics", 10),
    // advanced methods
    ("extreme_value_theory", "probability_theory", 14),
    ("extreme_value_theory", "scaling_laws", 10),
    ("extreme_value_theory", "robust_statistics", 8),
    ("bayesian_methods", "parametric_methods", 12),
    ("bayesian_methods", "model_validation", 10),
    ("optimization_methods", "neural_networks", 12),
    ("optimization_methods", "clustering_methods", 8),
    ("dimensionality_reduction", "spectral_analysis", 8),
    ("dimensionality_reduction", "neural_networks", 6),
    ("robust_statistics", "nonparametric_methods", 8),
    ("robust_statistics", "model_validation", 6),
    ("spectral_analysis", "neural_networks", 5),
    ("financial_modeling", "extreme_value_theory", 6),
    ("financial_modeling", "multivariate_analysis", 5),
    // scaling and cross-links
    ("scaling_laws", "probability_theory", 14),
    ("scaling_laws", "network_analysis", 8),
    ("correlation_analysis", "causal_inference", 8),
    ("model_validation", "information_theory", 6),
    ("clustering_methods", "information_theory", 5),
    ("neural_networks", "information_theory", 4),
    ("spectral_analysis", "probability_theory", 6),
    ("financial_modeling", "statistical_modeling", 4),
    ("univariate", "probability_theory", 8),
    ("univariate", "parametric_methods", 6),
    ("univariate", "nonparametric_methods", 5),
];

const PALETTE: &[(&str, &str)] = &[
    ("probability_theory", "#FF6B6B"),
    ("statistical_modeling", "#4ECDC4"),
    ("data_analysis", "#45B7D1"),
    ("parameter_estimation", "#96CEB4"),
    ("multivariate_analysis", "#FFEAA7"),
    ("parametric_methods", "#DDA0DD"),
    ("information_theory", "#98D8C8"),
    ("scaling_laws", "#F7DC6F"),
    ("time_series_analysis", "#BB8FCE"),
    ("network_analysis", "#85C1E9"),
    ("model_validation", "#F8C471"),
    ("causal_inference", "#F1948A"),
    ("correlation_analysis", "#82E0AA"),
    ("nonparametric_methods", "#D7BDE2"),
    ("machine_learning", "#76D7C4"),
    ("extreme_value_theory", "#F8D7DA"),
    ("bayesian_methods", "#D4EDDA"),
    ("optimization_methods", "#FFF3CD"),
    ("dimensionality_reduction", "#CCE5FF"),
    ("clustering_methods", "#E7E7FF"),
    ("robust_statistics", "#FFCCCB"),
    ("spectral_analysis", "#E0FFE0"),
    ("neural_networks", "#FFE0CC"),
    ("financial_modeling", "#E0E0FF"),
];

const UNIVARIATE_COLOR: (&str, &str) = ("univariate", "#FFEBCD");

const CHAPTERS: &[(i64, &str)] = &[
    (26, "1. Introduction"),
    (29, "2. Fundamentals of Probability"),
    (44, "3. Fundamentals of Machine Learning"),
    (56, "4. Fundamentals of Networks"),
    (70, "5. Univariate Probabilities"),
    (102, "6. Multivariate Probabilities"),
    (122, "7. Entropies"),
    (136, "8. Dependence"),
    (164, "9. Stochastic Processes"),
    (190, "10. Causation"),
    (206, "11. Networks as Representations"),
    (224, "12. Probabilistic Modeling"),
    (244, "13. Nonparametric Estimation"),
    (264, "14. Parametric Estimation"),
    (290, "15. Estimation of Multivariate"),
    (324, "16. Time Series"),
    (352, "17. Construction of Networks"),
    (370, "18. Assessing Goodness"),
    (414, "19. Conclusions"),
];

pub fn final_concepts() -> Vec<Concept> {
    FINAL_CONCEPTS
        .iter()
        .map(|(key, n)| Concept::new(*key, *n))
        .collect()
}

/// Single-word counts promoted to multi-word keys, followed by the additional concepts.
pub fn enhanced_concepts() -> Vec<Concept> {
    let mut out: Vec<Concept> = SINGLE_WORD_COUNTS
        .iter()
        .map(|(word, n)| {
            let key = MULTI_WORD_KEYS
                .iter()
                .find(|(w, _)| w == word)
                .map(|(_, k)| *k)
                .unwrap_or(word);
            Concept::new(key, *n)
        })
        .collect();

    for (key, n) in ADDITIONAL_CONCEPTS {
        match out.iter_mut().find(|c| c.key == *key) {
            Some(existing) => existing.mentions = *n,
            None => out.push(Concept::new(*key, *n)),
        }
    }
    out
}

pub fn concept_connections() -> &'static [(&'static str, &'static str, u32)] {
    CONNECTIONS
}

pub fn concept_palette(variant: NetworkVariant) -> Vec<(&'static str, &'static str)> {
    let mut palette = PALETTE.to_vec();
    if variant == NetworkVariant::Final {
        palette.push(UNIVARIATE_COLOR);
    }
    palette
}

pub fn build_network(variant: NetworkVariant) -> ConceptGraph {
    let concepts = match variant {
        NetworkVariant::Final => final_concepts(),
        NetworkVariant::Enhanced => enhanced_concepts(),
    };
    let palette = concept_palette(variant);

    let mut graph = ConceptGraph::with_concepts(concepts.into_iter().map(|c| {
        let color = palette
            .iter()
            .find(|(k, _)| *k == c.key)
            .map(|(_, color)| *color)
            .unwrap_or(DEFAULT_CONCEPT_COLOR);
        c.with_color(color)
    }));

    for (source, target, strength) in CONNECTIONS {
        graph.insert_link(source, target, *strength);
    }

    if variant == NetworkVariant::Enhanced {
        let patched = graph.connect_isolated(&HubRule::default());
        tracing::debug!(patched, "patched isolated concepts");
    }

    tracing::info!(
        variant = variant.as_str(),
        concepts = graph.len(),
        links = graph.link_count(),
        "built concept network"
    );
    graph
}

pub fn main_chapters() -> Vec<Chapter> {
    CHAPTERS
        .iter()
        .map(|(page, title)| Chapter {
            page: *page,
            title: title.to_string(),
        })
        .collect()
}
