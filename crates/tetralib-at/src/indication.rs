//! Unsolicited indication templates and buffering instances.
//!
//! An indication is registered as a tuple of (prefix, trailing line count,
//! handler). A line whose upper-cased form begins with the upper-cased prefix
//! starts an indication; the instance then absorbs the declared number of
//! trailing lines before the handler is invoked exactly once with the ordered
//! line list.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

/// Handler invoked with the complete line list of a matched indication.
pub type IndicationHandler = Arc<dyn Fn(Vec<String>) + Send + Sync>;

/// A registered indication template.
#[derive(Clone)]
pub(crate) struct IndicationConfig {
    /// Upper-cased match prefix.
    pub prefix: String,
    /// Number of content lines following the matching line.
    pub trailing_lines: usize,
    pub handler: IndicationHandler,
}

/// Find the registered indication template matching `line`, if any.
pub(crate) fn find_indication(
    registry: &HashMap<String, IndicationConfig>,
    line: &str,
) -> Option<IndicationConfig> {
    let upper = line.to_uppercase();
    registry
        .values()
        .find(|config| upper.starts_with(&config.prefix))
        .cloned()
}

impl IndicationConfig {
    /// Start an indication with its matching line.
    ///
    /// A zero-trailer indication is dispatched immediately (the handler may
    /// run inline, it cannot re-enter the loop's state machine) and no
    /// instance is retained. Otherwise the returned instance absorbs the
    /// trailing lines.
    pub fn start(&self, line: &str) -> Option<Indication> {
        debug!(prefix = %self.prefix, "line starts an indication");
        if self.trailing_lines == 0 {
            (self.handler)(vec![line.to_string()]);
            return None;
        }
        Some(Indication {
            config: self.clone(),
            lines: vec![line.to_string()],
        })
    }
}

/// An indication instance buffering its trailing lines.
pub(crate) struct Indication {
    config: IndicationConfig,
    lines: Vec<String>,
}

impl Indication {
    /// Absorb the next line. Returns `true` once the instance is complete;
    /// the handler is then scheduled on a background task so it cannot stall
    /// the transport loop.
    pub fn add_line(&mut self, line: &str) -> bool {
        self.lines.push(line.to_string());
        if self.lines.len() < self.config.trailing_lines + 1 {
            return false;
        }

        debug!(
            prefix = %self.config.prefix,
            lines = self.lines.len(),
            "indication complete"
        );
        let handler = Arc::clone(&self.config.handler);
        let lines = std::mem::take(&mut self.lines);
        tokio::spawn(async move { handler(lines) });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn registry_with(
        prefix: &str,
        trailing: usize,
    ) -> (
        HashMap<String, IndicationConfig>,
        mpsc::UnboundedReceiver<Vec<String>>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let config = IndicationConfig {
            prefix: prefix.to_uppercase(),
            trailing_lines: trailing,
            handler: Arc::new(move |lines| {
                let _ = tx.send(lines);
            }),
        };
        let mut registry = HashMap::new();
        registry.insert(config.prefix.clone(), config);
        (registry, rx)
    }

    #[tokio::test]
    async fn match_is_case_insensitive() {
        let (registry, mut rx) = registry_with("Ind0:", 0);

        let config = find_indication(&registry, "ind0:message").unwrap();
        assert!(config.start("ind0:message").is_none());
        assert_eq!(rx.recv().await.unwrap(), vec!["ind0:message"]);
    }

    #[tokio::test]
    async fn non_matching_line_is_not_consumed() {
        let (registry, _rx) = registry_with("+CTSDSR:", 1);
        assert!(find_indication(&registry, "+CTOM: 0").is_none());
    }

    #[tokio::test]
    async fn buffers_declared_trailing_lines() {
        let (registry, mut rx) = registry_with("IND2:", 2);

        let config = find_indication(&registry, "IND2:header").unwrap();
        let mut indication = config.start("IND2:header").unwrap();
        assert!(!indication.add_line("message1"));
        assert!(indication.add_line("message2"));

        assert_eq!(
            rx.recv().await.unwrap(),
            vec!["IND2:header", "message1", "message2"]
        );
    }
}
