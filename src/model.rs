use crate::core::{Millis, RegionId, RootMargin, Threshold};
use crate::error::{InviewError, InviewResult};

/// Per-container animation policy: when to trigger and how to pace the
/// staggered child reveals.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealPolicy {
    /// Minimum visible fraction of the container required to trigger.
    #[serde(default)]
    pub threshold: Threshold,
    /// Expansion of the viewport bounds used for the intersection test.
    #[serde(default)]
    pub root_margin: RootMargin,
    /// Delay step between consecutive stagger children, in milliseconds.
    #[serde(default = "default_stagger_step")]
    pub stagger_step_ms: u64,
}

fn default_stagger_step() -> u64 {
    100
}

impl Default for RevealPolicy {
    fn default() -> Self {
        Self {
            threshold: Threshold::DEFAULT,
            root_margin: RootMargin::ZERO,
            stagger_step_ms: default_stagger_step(),
        }
    }
}

impl RevealPolicy {
    /// Linear stagger: child `i` is delayed by `stagger_step_ms * i`.
    pub fn stagger_delay(&self, index: usize) -> Millis {
        let index = u64::try_from(index).unwrap_or(u64::MAX);
        Millis(self.stagger_step_ms.saturating_mul(index))
    }
}

/// One observed region: a stable id, its policy, and the ordered handles of
/// its stagger children, fixed at registration time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegionSpec {
    pub id: RegionId,
    #[serde(default)]
    pub policy: RevealPolicy,
    #[serde(default)]
    pub children: Vec<String>,
}

impl RegionSpec {
    pub fn new(id: impl Into<RegionId>) -> Self {
        Self {
            id: id.into(),
            policy: RevealPolicy::default(),
            children: Vec::new(),
        }
    }
}

pub struct RegionSpecBuilder {
    spec: RegionSpec,
}

impl RegionSpecBuilder {
    pub fn new(id: impl Into<RegionId>) -> Self {
        Self {
            spec: RegionSpec::new(id),
        }
    }

    pub fn threshold(mut self, fraction: f64) -> InviewResult<Self> {
        self.spec.policy.threshold = Threshold::new(fraction)?;
        Ok(self)
    }

    pub fn root_margin(mut self, margin: &str) -> InviewResult<Self> {
        self.spec.policy.root_margin = margin.parse()?;
        Ok(self)
    }

    pub fn stagger_step_ms(mut self, step: u64) -> Self {
        self.spec.policy.stagger_step_ms = step;
        self
    }

    pub fn child(mut self, handle: impl Into<String>) -> Self {
        self.spec.children.push(handle.into());
        self
    }

    pub fn children<I, S>(mut self, handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec
            .children
            .extend(handles.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> RegionSpec {
        self.spec
    }
}

/// A page's worth of region registrations, loadable from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealConfig {
    pub regions: Vec<RegionSpec>,
}

impl RevealConfig {
    pub fn validate(&self) -> InviewResult<()> {
        let mut seen = std::collections::BTreeSet::new();
        for region in &self.regions {
            if region.id.as_str().is_empty() {
                return Err(InviewError::validation("region id must be non-empty"));
            }
            if !seen.insert(&region.id) {
                return Err(InviewError::policy(format!(
                    "duplicate region id '{}'",
                    region.id
                )));
            }
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> InviewResult<Self> {
        let config: Self =
            serde_json::from_str(s).map_err(|e| InviewError::serde(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stagger_delay_is_linear() {
        let policy = RevealPolicy::default();
        assert_eq!(policy.stagger_delay(0), Millis(0));
        assert_eq!(policy.stagger_delay(1), Millis(100));
        assert_eq!(policy.stagger_delay(7), Millis(700));

        let timeline = RevealPolicy {
            stagger_step_ms: 200,
            ..RevealPolicy::default()
        };
        assert_eq!(timeline.stagger_delay(3), Millis(600));
    }

    #[test]
    fn builder_produces_validated_policy() {
        let spec = RegionSpecBuilder::new("skills")
            .threshold(0.25)
            .unwrap()
            .root_margin("0px 50px")
            .unwrap()
            .stagger_step_ms(200)
            .children(["card-0", "card-1"])
            .build();

        assert_eq!(spec.id, RegionId::new("skills"));
        assert_eq!(spec.policy.threshold.fraction(), 0.25);
        assert_eq!(spec.policy.stagger_step_ms, 200);
        assert_eq!(spec.children.len(), 2);

        assert!(RegionSpecBuilder::new("bad").threshold(1.5).is_err());
    }

    #[test]
    fn policy_defaults_fill_missing_json_fields() {
        let spec: RegionSpec = serde_json::from_str(r#"{ "id": "hero" }"#).unwrap();
        assert_eq!(spec.policy, RevealPolicy::default());
        assert!(spec.children.is_empty());

        let policy: RevealPolicy = serde_json::from_str(r#"{ "root_margin": "10px 5%" }"#).unwrap();
        assert_eq!(policy.root_margin, "10px 5%".parse().unwrap());
        assert_eq!(policy.threshold, Threshold::DEFAULT);
    }

    #[test]
    fn config_rejects_duplicate_region_ids() {
        let config = RevealConfig {
            regions: vec![RegionSpec::new("a"), RegionSpec::new("a")],
        };
        assert!(matches!(
            config.validate(),
            Err(InviewError::Policy(msg)) if msg.contains("duplicate region id")
        ));
    }

    #[test]
    fn config_rejects_bad_threshold_json() {
        let err = RevealConfig::from_json_str(
            r#"{ "regions": [{ "id": "a", "policy": { "threshold": 2.0 } }] }"#,
        );
        assert!(err.is_err());
    }
}
