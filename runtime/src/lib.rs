//! # Tasklist Runtime
//!
//! The [`Store`](store::Store) owns a reducer's state and environment,
//! runs actions through the reducer and executes the effects it returns.
//!
//! Execution is synchronous and single-threaded: [`Store::send`](store::Store::send)
//! runs the action, and every action its effects dispatch, to completion
//! before returning. Dispatched actions are processed in FIFO order.
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! store.send(Action::DoSomething)?;
//!
//! let value = store.state(|s| s.some_field);
//! ```

use std::collections::VecDeque;
use tasklist_core::{effect::Effect, reducer::Reducer};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur while the store processes an action
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// A chain of dispatched actions grew deeper than the configured limit
        ///
        /// Actions processed before the limit was hit keep their state changes.
        #[error("Dispatch depth exceeded limit of {limit}")]
        DispatchDepthExceeded {
            /// The configured maximum depth
            limit: usize,
        },
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use tasklist_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_dispatch_depth(4);
/// assert_eq!(config.max_dispatch_depth, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// How many `Effect::Dispatch` hops may follow the action passed to `send`
    pub max_dispatch_depth: usize,
}

impl StoreConfig {
    /// Default dispatch depth
    pub const DEFAULT_MAX_DISPATCH_DEPTH: usize = 16;

    /// Create a new configuration
    #[must_use]
    pub const fn new(max_dispatch_depth: usize) -> Self {
        Self { max_dispatch_depth }
    }

    /// Set the maximum dispatch depth
    #[must_use]
    pub const fn with_max_dispatch_depth(mut self, depth: usize) -> Self {
        self.max_dispatch_depth = depth;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DISPATCH_DEPTH)
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{Effect, Reducer, StoreConfig, StoreError, VecDeque};

    /// The Store - runtime coordinator for a reducer
    ///
    /// Owns the state, the reducer and the environment. The state is only
    /// reachable through [`Store::state`] and [`Store::into_state`], so every
    /// change goes through the reducer.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: S,
        reducer: R,
        environment: E,
        config: StoreConfig,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: std::fmt::Debug,
    {
        /// Create a new store with the default [`StoreConfig`]
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with an explicit configuration
        #[must_use]
        pub const fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                config,
            }
        }

        /// Returns the store configuration
        #[must_use]
        pub const fn config(&self) -> &StoreConfig {
            &self.config
        }

        /// Send an action through the reducer
        ///
        /// Runs `action`, then every action dispatched by the resulting
        /// effects, in FIFO order. Returns how many actions were reduced.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::DispatchDepthExceeded`] if a dispatch chain
        /// grows deeper than [`StoreConfig::max_dispatch_depth`]. Remaining
        /// queued actions are dropped.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&mut self, action: A) -> Result<usize, StoreError> {
            let mut queue = VecDeque::from([(action, 0_usize)]);
            let mut processed = 0;

            while let Some((action, depth)) = queue.pop_front() {
                tracing::debug!(?action, depth, "Processing action");

                let effects = self.reducer.reduce(&mut self.state, action, &self.environment);
                processed += 1;

                tracing::trace!("Reducer completed, returned {} effects", effects.len());

                for effect in effects {
                    self.enqueue(effect, depth, &mut queue)?;
                }
            }

            tracing::debug!(processed, "Action processing completed");
            Ok(processed)
        }

        /// Flattens an effect into the pending queue
        fn enqueue(
            &self,
            effect: Effect<A>,
            depth: usize,
            queue: &mut VecDeque<(A, usize)>,
        ) -> Result<(), StoreError> {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                }
                Effect::Dispatch(action) => {
                    let next = depth + 1;
                    if next > self.config.max_dispatch_depth {
                        tracing::warn!(
                            limit = self.config.max_dispatch_depth,
                            ?action,
                            "Dropping dispatched action: depth limit reached"
                        );
                        return Err(StoreError::DispatchDepthExceeded {
                            limit: self.config.max_dispatch_depth,
                        });
                    }
                    tracing::trace!("Executing Effect::Dispatch");
                    queue.push_back((*action, next));
                }
                Effect::Sequential(effects) => {
                    tracing::trace!("Executing Effect::Sequential with {} effects", effects.len());
                    for effect in effects {
                        self.enqueue(effect, depth, queue)?;
                    }
                }
            }
            Ok(())
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let total = store.state(|s| s.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.state)
        }

        /// Returns the environment the reducer runs with
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// Consume the store and return its state
        #[must_use]
        pub fn into_state(self) -> S {
            self.state
        }
    }
}

pub use store::Store;
