//! Table configuration options.

use core::time::Duration;

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use core::time::Duration;
/// use bjsolo::GameOptions;
///
/// let options = GameOptions::default()
///     .with_starting_chips(500)
///     .with_dealer_delay(Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOptions {
    /// Chips the player starts with.
    pub starting_chips: usize,
    /// Pause between successive dealer draws.
    pub dealer_delay: Duration,
    /// Maximum height of the discard stack reported to renderers.
    pub discard_stack_cap: usize,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            starting_chips: 1000,
            dealer_delay: Duration::from_secs(1),
            discard_stack_cap: 5,
        }
    }
}

impl GameOptions {
    /// Sets the starting chip balance.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsolo::GameOptions;
    ///
    /// let options = GameOptions::default().with_starting_chips(250);
    /// assert_eq!(options.starting_chips, 250);
    /// ```
    #[must_use]
    pub const fn with_starting_chips(mut self, chips: usize) -> Self {
        self.starting_chips = chips;
        self
    }

    /// Sets the pause between dealer draws.
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    /// use bjsolo::GameOptions;
    ///
    /// let options = GameOptions::default().with_dealer_delay(Duration::ZERO);
    /// assert_eq!(options.dealer_delay, Duration::ZERO);
    /// ```
    #[must_use]
    pub const fn with_dealer_delay(mut self, delay: Duration) -> Self {
        self.dealer_delay = delay;
        self
    }

    /// Sets the cap on the reported discard stack height.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsolo::GameOptions;
    ///
    /// let options = GameOptions::default().with_discard_stack_cap(3);
    /// assert_eq!(options.discard_stack_cap, 3);
    /// ```
    #[must_use]
    pub const fn with_discard_stack_cap(mut self, cap: usize) -> Self {
        self.discard_stack_cap = cap;
        self
    }
}
