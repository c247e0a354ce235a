/// Config for an injection point factory
/// ## Fields
/// - `dispatch_hooks`:
///   If `true`, every field and normal parameter descriptor is passed through the manager's
///   extension hooks, and the descriptor the hooks return is the one handed to the caller.
///
///   Disposer and observer parameters are never dispatched.
///   A factory with this flag unset is used for infrastructure-internal injection points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub dispatch_hooks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { dispatch_hooks: true }
    }
}
