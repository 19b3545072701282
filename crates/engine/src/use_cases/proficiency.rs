//! Proficiency Budget Allocator.
//!
//! Three pools (skills, trades, languages). One skill point converts into two
//! trade points, one trade point into two language points. A conversion is
//! charged as spending in the source pool and credited as availability in the
//! target pool, so every operation keeps `remaining = available - spent`.
//!
//! Every operation either applies fully or leaves the budget untouched.

use sheetsmith_domain::{
    PoolSummary, ProficiencyConversionState, ProficiencyPool, ProficiencySummary, RulesError,
};

/// Target-pool points gained per converted source point.
pub const CONVERSION_RATE: i32 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProficiencyBudget {
    base_skills: i32,
    base_trades: i32,
    base_languages: i32,
    allocated_skills: i32,
    allocated_trades: i32,
    allocated_languages: i32,
    conversions: ProficiencyConversionState,
}

impl ProficiencyBudget {
    pub fn new(skills: i32, trades: i32, languages: i32) -> Self {
        Self {
            base_skills: skills,
            base_trades: trades,
            base_languages: languages,
            ..Self::default()
        }
    }

    // =========================================================================
    // Balances
    // =========================================================================

    pub fn available(&self, pool: ProficiencyPool) -> i32 {
        let conv = &self.conversions;
        match pool {
            ProficiencyPool::Skills => self.base_skills,
            ProficiencyPool::Trades => {
                self.base_trades + CONVERSION_RATE * conv.skill_to_trade as i32
            }
            ProficiencyPool::Languages => {
                self.base_languages + CONVERSION_RATE * conv.trade_to_language as i32
            }
        }
    }

    pub fn spent(&self, pool: ProficiencyPool) -> i32 {
        let conv = &self.conversions;
        match pool {
            ProficiencyPool::Skills => self.allocated_skills + conv.skill_to_trade as i32,
            ProficiencyPool::Trades => self.allocated_trades + conv.trade_to_language as i32,
            ProficiencyPool::Languages => self.allocated_languages,
        }
    }

    pub fn remaining(&self, pool: ProficiencyPool) -> i32 {
        self.available(pool) - self.spent(pool)
    }

    pub fn balance(&self, pool: ProficiencyPool) -> PoolSummary {
        PoolSummary {
            available: self.available(pool),
            spent: self.spent(pool),
            remaining: self.remaining(pool),
        }
    }

    pub fn conversions(&self) -> ProficiencyConversionState {
        self.conversions
    }

    pub fn summary(&self) -> ProficiencySummary {
        ProficiencySummary {
            skills: self.balance(ProficiencyPool::Skills),
            trades: self.balance(ProficiencyPool::Trades),
            languages: self.balance(ProficiencyPool::Languages),
            conversions: self.conversions,
        }
    }

    // =========================================================================
    // Allocation
    // =========================================================================

    /// Spend `amount` points from `pool` on ranks or fluency.
    pub fn spend(&mut self, pool: ProficiencyPool, amount: i32) -> Result<(), RulesError> {
        if amount < 0 {
            return Err(RulesError::InvalidProficiencySelection(format!(
                "cannot spend a negative amount ({}) of {} points",
                amount, pool
            )));
        }
        self.require_remaining(pool, amount)?;
        *self.allocated_mut(pool) += amount;
        Ok(())
    }

    /// Return previously spent points to `pool`.
    pub fn refund(&mut self, pool: ProficiencyPool, amount: i32) -> Result<(), RulesError> {
        let allocated = self.allocated_mut(pool);
        if amount < 0 || amount > *allocated {
            return Err(RulesError::InvalidProficiencySelection(format!(
                "cannot refund {} {} points, {} allocated",
                amount, pool, allocated
            )));
        }
        *allocated -= amount;
        Ok(())
    }

    fn allocated_mut(&mut self, pool: ProficiencyPool) -> &mut i32 {
        match pool {
            ProficiencyPool::Skills => &mut self.allocated_skills,
            ProficiencyPool::Trades => &mut self.allocated_trades,
            ProficiencyPool::Languages => &mut self.allocated_languages,
        }
    }

    fn require_remaining(&self, pool: ProficiencyPool, required: i32) -> Result<(), RulesError> {
        let remaining = self.remaining(pool);
        if remaining < required {
            return Err(RulesError::ProficiencyBudgetExceeded {
                pool,
                required,
                remaining,
            });
        }
        Ok(())
    }

    // =========================================================================
    // Conversions
    // =========================================================================

    pub fn convert_skill_to_trade(&mut self) -> Result<(), RulesError> {
        self.require_remaining(ProficiencyPool::Skills, 1)?;
        self.conversions.skill_to_trade += 1;
        Ok(())
    }

    pub fn convert_trade_to_language(&mut self) -> Result<(), RulesError> {
        self.require_remaining(ProficiencyPool::Trades, 1)?;
        self.conversions.trade_to_language += 1;
        Ok(())
    }

    /// Undo one skill-to-trade conversion. The two trade points it produced
    /// must still be unspent.
    pub fn unconvert_skill_to_trade(&mut self) -> Result<(), RulesError> {
        if self.conversions.skill_to_trade == 0 {
            return Err(RulesError::inconsistent_conversion(
                "no skill-to-trade conversion to undo",
            ));
        }
        let remaining = self.remaining(ProficiencyPool::Trades);
        if remaining < CONVERSION_RATE {
            return Err(RulesError::inconsistent_conversion(format!(
                "undoing a skill conversion needs {} unspent trade points, {} remaining",
                CONVERSION_RATE, remaining
            )));
        }
        self.conversions.skill_to_trade -= 1;
        Ok(())
    }

    /// Undo one trade-to-language conversion. The two language points it
    /// produced must still be unspent.
    pub fn unconvert_trade_to_language(&mut self) -> Result<(), RulesError> {
        if self.conversions.trade_to_language == 0 {
            return Err(RulesError::inconsistent_conversion(
                "no trade-to-language conversion to undo",
            ));
        }
        let remaining = self.remaining(ProficiencyPool::Languages);
        if remaining < CONVERSION_RATE {
            return Err(RulesError::inconsistent_conversion(format!(
                "undoing a trade conversion needs {} unspent language points, {} remaining",
                CONVERSION_RATE, remaining
            )));
        }
        self.conversions.trade_to_language -= 1;
        Ok(())
    }

    /// Reverse every conversion, or none of them.
    pub fn reset_conversions(&mut self) -> Result<(), RulesError> {
        let mut next = *self;
        while next.conversions.trade_to_language > 0 {
            next.unconvert_trade_to_language()?;
        }
        while next.conversions.skill_to_trade > 0 {
            next.unconvert_skill_to_trade()?;
        }
        *self = next;
        Ok(())
    }

    /// Replay a submission's conversion counters, skill conversions first.
    pub fn apply_conversions(
        &mut self,
        state: &ProficiencyConversionState,
    ) -> Result<(), RulesError> {
        let mut next = *self;
        for _ in 0..state.skill_to_trade {
            next.convert_skill_to_trade()?;
        }
        for _ in 0..state.trade_to_language {
            next.convert_trade_to_language()?;
        }
        *self = next;
        Ok(())
    }
}
