use serde::Serialize;

use crate::api::VisClient;
use crate::domain::{DataCompleteness, DataSource, TournamentDetail};
use crate::errors::ApiError;

/// Data plus a record of how it was obtained
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackResult<T> {
    pub data: T,
    pub fallback_used: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_encountered: Option<ApiError>,
    pub data_completeness: DataCompleteness,
    pub source: DataSource,
}

impl<T> FallbackResult<T> {
    pub fn primary(data: T) -> Self {
        Self {
            data,
            fallback_used: false,
            error_encountered: None,
            data_completeness: DataCompleteness::Full,
            source: DataSource::Primary,
        }
    }

    pub fn fallback(data: T, completeness: DataCompleteness, error: ApiError) -> Self {
        Self {
            data,
            fallback_used: true,
            error_encountered: Some(error.sanitized()),
            data_completeness: completeness,
            source: DataSource::Fallback,
        }
    }

    /// Same data, now served from the detail cache
    pub fn cached_copy(&self) -> Self
    where
        T: Clone,
    {
        Self {
            source: DataSource::Cache,
            ..self.clone()
        }
    }
}

/// Replace a failed enhanced detail call with the basic list record.
///
/// Returns the primary error, marked as having attempted a fallback, when the
/// fallback call fails or finds no usable record.
pub async fn resolve(
    client: &VisClient,
    number: u32,
    primary: ApiError,
) -> Result<FallbackResult<TournamentDetail>, ApiError> {
    let primary = primary.with_fallback_attempted();
    client.logger().log_fallback(number, &primary);

    let detail = match client.fetch_fallback_detail(number).await {
        Ok(Some(detail)) => detail,
        Ok(None) | Err(_) => return Err(primary),
    };

    let primary = match &detail.code {
        Some(code) => primary.with_tournament_code(code.clone()),
        None => primary,
    };

    match completeness_of(&detail) {
        Some(completeness) => Ok(FallbackResult::fallback(detail, completeness, primary)),
        None => Err(primary),
    }
}

/// `None` when the record cannot even identify the tournament
pub fn completeness_of(detail: &TournamentDetail) -> Option<DataCompleteness> {
    if detail.has_basic_fields() {
        Some(DataCompleteness::Partial)
    } else if detail.code.is_some() || detail.name.is_some() {
        Some(DataCompleteness::Minimal)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::vis_client::tests::{fast_settings, ok, status, ScriptedTransport};
    use crate::telemetry::ProductionLogger;
    use std::sync::Arc;

    #[test]
    fn test_completeness_levels() {
        let mut detail = TournamentDetail {
            number: 4,
            ..TournamentDetail::default()
        };
        assert_eq!(completeness_of(&detail), None);

        detail.name = Some("Open".to_string());
        assert_eq!(completeness_of(&detail), Some(DataCompleteness::Minimal));
    }

    #[tokio::test]
    async fn test_minimal_fallback_record() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            status(401),
            ok(r#"<Responses><BeachTournament No="8" Name="Local Open" /></Responses>"#),
        ]));
        let client = VisClient::with_transport(transport, &fast_settings(), Arc::new(ProductionLogger::new()));

        let result = client.fetch_tournament_detail(8).await.unwrap();

        assert_eq!(result.data_completeness, DataCompleteness::Minimal);
        assert_eq!(result.data.name.as_deref(), Some("Local Open"));
        assert_eq!(result.source, DataSource::Fallback);
    }

    #[tokio::test]
    async fn test_serialized_shape() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            status(401),
            ok(r#"<Responses><BeachTournament No="8" Name="Local Open" /></Responses>"#),
        ]));
        let client = VisClient::with_transport(transport, &fast_settings(), Arc::new(ProductionLogger::new()));

        let result = client.fetch_tournament_detail(8).await.unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["fallbackUsed"], true);
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["dataCompleteness"], "minimal");
        assert_eq!(json["errorEncountered"]["category"]["type"], "authentication");
        assert_eq!(json["errorEncountered"]["category"]["severity"], "low");
        assert_eq!(json["errorEncountered"]["context"]["fallbackAttempted"], true);
        assert_eq!(json["errorEncountered"]["context"]["tournamentNumber"], 8);
        assert_eq!(json["errorEncountered"]["context"]["tournamentCode"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_fallback_error_carries_tournament_code() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            status(401),
            ok(r#"<Responses><BeachTournament No="8" Code="MLOC2025" Name="Local Open" /></Responses>"#),
        ]));
        let client = VisClient::with_transport(transport, &fast_settings(), Arc::new(ProductionLogger::new()));

        let result = client.fetch_tournament_detail(8).await.unwrap();
        let error = result.error_encountered.unwrap();

        assert_eq!(error.context().tournament_code.as_deref(), Some("MLOC2025"));
        assert_eq!(error.context().tournament_number, Some(8));
    }

    #[test]
    fn test_cache_copy_keeps_data() {
        let original = FallbackResult::primary(TournamentDetail {
            number: 1,
            ..TournamentDetail::default()
        });
        let cached = original.cached_copy();

        assert_eq!(cached.source, DataSource::Cache);
        assert_eq!(cached.data, original.data);
        assert!(!cached.fallback_used);
    }
}
