use crate::language::Language;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub language: Language,
    pub text: String,
}

impl Question {
    pub fn new(language: Language, text: impl Into<String>) -> Self {
        Self {
            language,
            text: text.into(),
        }
    }
}

/// One collected answer. `index` is 1-based and follows request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSet {
    pub language: Language,
    responses: Vec<Response>,
}

impl ResponseSet {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            responses: Vec::new(),
        }
    }

    /// Appends `text` as the next response, numbered after the last one.
    pub fn push(&mut self, text: String) -> &Response {
        let index = self.responses.len() + 1;
        self.responses.push(Response { index, text });
        &self.responses[index - 1]
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Response> {
        self.responses.iter()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.responses.iter().map(|r| r.text.as_str()).collect()
    }

    /// All texts, one per line, in response order.
    pub fn joined(&self) -> String {
        self.texts().join("\n")
    }
}

/// One 3-D display coordinate per response, in response order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoints {
    pub points: Vec<[f64; 3]>,
}

impl ProjectedPoints {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Per-axis `(min, max)`, widened when an axis is flat so it can be drawn.
    pub fn bounds(&self) -> [(f64, f64); 3] {
        let mut bounds = [(f64::INFINITY, f64::NEG_INFINITY); 3];
        for point in &self.points {
            for (axis, value) in point.iter().enumerate() {
                bounds[axis].0 = bounds[axis].0.min(*value);
                bounds[axis].1 = bounds[axis].1.max(*value);
            }
        }
        for (lo, hi) in bounds.iter_mut() {
            if !lo.is_finite() || !hi.is_finite() {
                *lo = -1.0;
                *hi = 1.0;
            } else if (*hi - *lo).abs() < 1e-9 {
                *lo -= 0.5;
                *hi += 0.5;
            }
        }
        bounds
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: usize,
    /// Top centroid terms joined by the language separator.
    pub label: String,
    pub terms: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    /// Cluster id for each response, in response order.
    pub assignments: Vec<usize>,
    /// One entry per cluster id, including clusters that ended up empty.
    pub clusters: Vec<Cluster>,
}

impl ClusterAssignment {
    pub fn total(&self) -> usize {
        self.clusters.iter().map(|c| c.count).sum()
    }

    pub fn non_empty(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter().filter(|c| c.count > 0)
    }

    /// Share of all responses held by `cluster`, in percent.
    pub fn share_percent(&self, cluster: &Cluster) -> f64 {
        match self.assignments.len() {
            0 => 0.0,
            n => cluster.count as f64 / n as f64 * 100.0,
        }
    }
}

/// Everything produced for one language in one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticMap {
    pub question: Question,
    pub responses: ResponseSet,
    pub vocabulary_size: usize,
    pub points: ProjectedPoints,
    pub clusters: ClusterAssignment,
    pub summary: String,
}

impl SemanticMap {
    pub fn language(&self) -> Language {
        self.question.language
    }
}
