// ==============================================================================
// audit.rs - Derivation Audit Trail
// ==============================================================================
// Description: Records which inputs every pipeline output was derived from
// Author: Matt Barham
// Created: 2026-02-12
// Modified: 2026-02-15
// Version: 1.0.0
// ==============================================================================
// Nothing is persisted. The trail lives for one analysis and is attached to
// the report; each event is also emitted through tracing.
// ==============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    VariantsExtracted,
    DiplotypeResolved,
    NoGeneData,
    PhenotypeClassified,
    ConfidenceScored,
    RiskAssessed,
    ExplanationGenerated,
    ExplanationFallback,
}

impl AuditEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEventType::VariantsExtracted => "variants_extracted",
            AuditEventType::DiplotypeResolved => "diplotype_resolved",
            AuditEventType::NoGeneData => "no_gene_data",
            AuditEventType::PhenotypeClassified => "phenotype_classified",
            AuditEventType::ConfidenceScored => "confidence_scored",
            AuditEventType::RiskAssessed => "risk_assessed",
            AuditEventType::ExplanationGenerated => "explanation_generated",
            AuditEventType::ExplanationFallback => "explanation_fallback",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogSeverity {
    Info,
    Warning,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AuditEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event_type: AuditEventType,

    /// Gene or drug the event concerns
    pub resource: Option<String>,
    pub details: serde_json::Value,
    pub severity: LogSeverity,
}

impl AuditEvent {
    pub fn new(
        event_type: AuditEventType,
        resource: Option<String>,
        details: serde_json::Value,
    ) -> Self {
        let severity = match event_type {
            AuditEventType::NoGeneData | AuditEventType::ExplanationFallback => {
                LogSeverity::Warning
            }
            _ => LogSeverity::Info,
        };

        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event_type,
            resource,
            details,
            severity,
        }
    }

    fn emit(&self) {
        let event_type = self.event_type.as_str();
        match self.severity {
            LogSeverity::Info => info!(
                audit_id = %self.id,
                event = event_type,
                resource = self.resource.as_deref().unwrap_or("-"),
                details = %self.details,
                "audit"
            ),
            LogSeverity::Warning => warn!(
                audit_id = %self.id,
                event = event_type,
                resource = self.resource.as_deref().unwrap_or("-"),
                details = %self.details,
                "audit"
            ),
        }
    }
}

/// Ordered events for one analysis
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct AuditTrail {
    events: Vec<AuditEvent>,
}

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and emit it through tracing
    pub fn record(
        &mut self,
        event_type: AuditEventType,
        resource: Option<&str>,
        details: serde_json::Value,
    ) {
        let event = AuditEvent::new(event_type, resource.map(str::to_string), details);
        event.emit();
        self.events.push(event);
    }

    pub fn events(&self) -> &[AuditEvent] {
        &self.events
    }

    pub fn event_types(&self) -> Vec<AuditEventType> {
        self.events.iter().map(|e| e.event_type).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
