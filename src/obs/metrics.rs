// self
use crate::{auth::KeyType, obs::TokenOutcome};

/// Records a token outcome via the global metrics recorder (when enabled).
pub fn record_token_outcome(key_type: &KeyType, outcome: TokenOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"asc_auth_token_total",
			"key_type" => key_type.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (key_type, outcome);
	}
}
