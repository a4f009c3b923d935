//! Normalization of risk-assessment agent payloads.
//!
//! [`normalize`] turns an arbitrary `serde_json::Value` returned by the agent
//! into a [`StructuredMessage`]: display text, risk badges, a risk chart,
//! tables, file references and missing-data prompts. It never fails; fields
//! that are absent or of the wrong shape are treated as empty.

pub mod a2a;
pub mod accessor;
pub mod badges;
pub mod config;
pub mod envelope;
pub mod error;
pub mod files;
pub mod message;
pub mod missing;
pub mod normalize;
pub mod patterns;
pub mod risk;
pub mod tables;
pub mod text;

pub use config::{DebugTableKeywords, DuplicateLabelPolicy, NormalizerConfig};
pub use envelope::AgentEnvelope;
pub use error::AgentError;
pub use message::{Badge, ChartData, FileRef, RiskLevel, StructuredMessage, Table};
pub use normalize::{Normalizer, normalize};
