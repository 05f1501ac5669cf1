//! Round resolution: draw a number, derive its color, collect the winners
//!
//! The resolver holds no mutable state. It issues exactly one store call per
//! round and never removes or marks the wagers it reports as winners, so two
//! rounds on an unchanged table report the same wagers again. Winner amounts
//! are the original stake unless `ResolutionPolicy::apply_multiplier` is set.

use crate::common::traits::WagerStore;
use crate::common::types::{Wager, WagerFilter};
use crate::errors::StoreResult;
use crate::games::registry::BetTypeRegistry;
use crate::games::types::{BetType, Color, RoundResult, Winner, MAX_NUMBER, WHEEL_SIZE};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Source of drawn numbers in `0..=36`
pub trait NumberSource: Send + Sync {
    fn draw(&self) -> u8;
}

/// Draws from the operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureNumberSource;

impl NumberSource for SecureNumberSource {
    fn draw(&self) -> u8 {
        draw_with(&mut OsRng)
    }
}

/// Always returns the same number (tests and demos)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedNumber(u8);

impl FixedNumber {
    /// `None` unless `number` is a pocket on the wheel
    pub fn new(number: u8) -> Option<Self> {
        (number <= MAX_NUMBER).then_some(Self(number))
    }
}

impl NumberSource for FixedNumber {
    fn draw(&self) -> u8 {
        self.0
    }
}

/// Uniform draw over the 37 pockets by rejection sampling.
///
/// Values at or above the largest multiple of 37 that fits in a `u32` are
/// redrawn, so every pocket maps to the same number of accepted values.
pub fn draw_with<R: RngCore + ?Sized>(rng: &mut R) -> u8 {
    let size = WHEEL_SIZE as u32;
    let zone = (u32::MAX / size) * size;
    loop {
        let value = rng.next_u32();
        if value < zone {
            return (value % size) as u8;
        }
    }
}

/// Color of a pocket on the single-zero wheel
pub fn color_of(number: u8) -> Color {
    match number {
        0 => Color::Green,
        1..=10 | 19..=28 => {
            if number % 2 == 0 {
                Color::Black
            } else {
                Color::Red
            }
        }
        _ => {
            if number % 2 == 0 {
                Color::Red
            } else {
                Color::Black
            }
        }
    }
}

/// Switches for behaviour the service does not enable by default.
///
/// With both flags off only `straight` and `red/black` wagers can win and a
/// winner is reported with its original stake.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionPolicy {
    /// Also match odd/even, high/low, column and dozen wagers
    pub match_all_bet_types: bool,
    /// Report `stake * multiplier` instead of the stake
    pub apply_multiplier: bool,
}

/// Filters selecting the wagers that win on `number`
pub fn winning_filters(number: u8, color: Color, policy: &ResolutionPolicy) -> Vec<WagerFilter> {
    let mut filters = vec![
        WagerFilter::new(BetType::Straight, number.to_string()),
        WagerFilter::new(BetType::RedBlack, color.as_str()),
    ];

    // Zero loses every outside bet
    if policy.match_all_bet_types && number != 0 {
        let parity = if number % 2 == 0 { "even" } else { "odd" };
        let half = if number <= 18 { "low" } else { "high" };
        let column = match number % 3 {
            1 => "1",
            2 => "2",
            _ => "3",
        };
        let dozen = match number {
            1..=12 => "1-12",
            13..=24 => "13-24",
            _ => "25-36",
        };

        filters.push(WagerFilter::new(BetType::OddEven, parity));
        filters.push(WagerFilter::new(BetType::HighLow, half));
        filters.push(WagerFilter::new(BetType::Column, column));
        filters.push(WagerFilter::new(BetType::Dozen, dozen));
    }

    filters
}

/// Draws a result and matches it against the wagers of a table
#[derive(Clone)]
pub struct RoundResolver {
    store: Arc<dyn WagerStore>,
    source: Arc<dyn NumberSource>,
    registry: Arc<BetTypeRegistry>,
    policy: ResolutionPolicy,
}

impl RoundResolver {
    pub fn new(
        store: Arc<dyn WagerStore>,
        source: Arc<dyn NumberSource>,
        registry: Arc<BetTypeRegistry>,
        policy: ResolutionPolicy,
    ) -> Self {
        Self {
            store,
            source,
            registry,
            policy,
        }
    }

    pub fn policy(&self) -> &ResolutionPolicy {
        &self.policy
    }

    /// Play one round on a table
    pub async fn resolve(&self, table_id: Uuid) -> StoreResult<RoundResult> {
        let number = self.source.draw();
        let color = color_of(number);
        let filters = winning_filters(number, color, &self.policy);

        let wagers = self.store.list(table_id, &filters).await?;

        tracing::debug!(
            %table_id,
            number,
            %color,
            winners = wagers.len(),
            "Round resolved"
        );

        Ok(RoundResult {
            number,
            color,
            winners: wagers.iter().map(|wager| self.to_winner(wager)).collect(),
        })
    }

    fn to_winner(&self, wager: &Wager) -> Winner {
        let amount = if self.policy.apply_multiplier {
            let multiplier = wager
                .bet_type
                .parse::<BetType>()
                .ok()
                .and_then(|bet_type| self.registry.multiplier(bet_type))
                .unwrap_or(1);
            wager.amount.saturating_mul(multiplier)
        } else {
            wager.amount
        };

        Winner {
            bet_id: wager.id,
            amount,
            currency: wager.currency.clone(),
        }
    }
}
