//! Three-state value for anything fetched asynchronously.
//!
//! Views render `Loading`, `Loaded` and `Failed` the same way everywhere.

/// State of one async value on a screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Loadable<T> {
    #[default]
    Loading,
    Loaded(T),
    /// User-facing reason
    Failed(String),
}

impl<T> Loadable<T> {
    /// Build from a finished call, keeping only the user-facing message.
    pub fn from_result<E>(result: Result<T, E>, message: impl FnOnce(&E) -> String) -> Self {
        match result {
            Ok(value) => Loadable::Loaded(value),
            Err(e) => Loadable::Failed(message(&e)),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Loadable::Loaded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Loadable::Failed(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_loading() {
        let state: Loadable<u8> = Loadable::default();
        assert!(state.is_loading());
        assert!(state.value().is_none());
    }

    #[test]
    fn from_ok_result_is_loaded() {
        let state = Loadable::from_result(Ok::<_, String>(3), |e| e.clone());
        assert_eq!(state, Loadable::Loaded(3));
        assert_eq!(state.value(), Some(&3));
    }

    #[test]
    fn from_err_result_keeps_message() {
        let state: Loadable<u8> =
            Loadable::from_result(Err("boom"), |_| "Failed to fetch weather fact.".to_string());
        assert!(state.is_failed());
        assert_eq!(state.error(), Some("Failed to fetch weather fact."));
    }
}
