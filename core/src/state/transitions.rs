//! 状态转换规则和验证
//!
//! Store startup phases. User actions are only accepted once the store is
//! `Ready`, which happens after the single rehydration has been applied.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 启动阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorePhase {
    /// 种子数据已加载，快照读取中
    Booting,
    /// 快照合并中
    Rehydrating,
    /// 门控打开，可以接收用户动作
    Ready,
}

impl StorePhase {
    /// Moves to `to` if the transition is legal.
    pub fn advance_to(&mut self, to: StorePhase) -> Result<(), TransitionError> {
        StateTransition::validate(*self, to)?;
        *self = to;
        Ok(())
    }

    /// Moves to the phase that follows this one and returns it.
    pub fn advance(&mut self) -> Result<StorePhase, TransitionError> {
        let to = StateTransition::next_phase(*self)
            .ok_or(TransitionError::FromTerminalState { state: *self })?;
        self.advance_to(to)?;
        Ok(to)
    }
}

/// 状态转换错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Invalid transition from {from:?} to {to:?}")]
    InvalidTransition { from: StorePhase, to: StorePhase },
    #[error("Cannot transition from terminal state {state:?}")]
    FromTerminalState { state: StorePhase },
}

/// 状态转换
pub struct StateTransition;

impl StateTransition {
    /// 验证状态转换是否合法
    pub fn validate(from: StorePhase, to: StorePhase) -> Result<(), TransitionError> {
        if Self::is_terminal(from) {
            return Err(TransitionError::FromTerminalState { state: from });
        }

        let is_valid = matches!(
            (from, to),
            (StorePhase::Booting, StorePhase::Rehydrating)
                | (StorePhase::Rehydrating, StorePhase::Ready)
        );

        if is_valid {
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition { from, to })
        }
    }

    /// 获取下一个阶段
    pub fn next_phase(current: StorePhase) -> Option<StorePhase> {
        match current {
            StorePhase::Booting => Some(StorePhase::Rehydrating),
            StorePhase::Rehydrating => Some(StorePhase::Ready),
            StorePhase::Ready => None,
        }
    }

    /// 判断是否为终态
    pub fn is_terminal(phase: StorePhase) -> bool {
        matches!(phase, StorePhase::Ready)
    }

    pub fn phase_description(phase: StorePhase) -> &'static str {
        match phase {
            StorePhase::Booting => "loading snapshot",
            StorePhase::Rehydrating => "merging snapshot",
            StorePhase::Ready => "ready",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(StateTransition::validate(StorePhase::Booting, StorePhase::Rehydrating).is_ok());
        assert!(StateTransition::validate(StorePhase::Rehydrating, StorePhase::Ready).is_ok());
    }

    #[test]
    fn test_invalid_transitions() {
        assert_eq!(
            StateTransition::validate(StorePhase::Booting, StorePhase::Ready),
            Err(TransitionError::InvalidTransition {
                from: StorePhase::Booting,
                to: StorePhase::Ready
            })
        );
        assert!(StateTransition::validate(StorePhase::Rehydrating, StorePhase::Booting).is_err());
    }

    #[test]
    fn test_ready_is_terminal() {
        assert_eq!(
            StateTransition::validate(StorePhase::Ready, StorePhase::Rehydrating),
            Err(TransitionError::FromTerminalState {
                state: StorePhase::Ready
            })
        );
    }

    #[test]
    fn test_advance_to() {
        let mut phase = StorePhase::Booting;
        phase.advance_to(StorePhase::Rehydrating).unwrap();
        phase.advance_to(StorePhase::Ready).unwrap();
        assert!(phase.advance_to(StorePhase::Rehydrating).is_err());
        assert_eq!(phase, StorePhase::Ready);
    }

    #[test]
    fn test_next_phase() {
        assert_eq!(
            StateTransition::next_phase(StorePhase::Booting),
            Some(StorePhase::Rehydrating)
        );
        assert_eq!(StateTransition::next_phase(StorePhase::Ready), None);
    }

    #[test]
    fn test_advance_follows_next_phase() {
        let mut phase = StorePhase::Booting;
        assert_eq!(phase.advance(), Ok(StorePhase::Rehydrating));
        assert_eq!(phase.advance(), Ok(StorePhase::Ready));
        assert_eq!(
            phase.advance(),
            Err(TransitionError::FromTerminalState {
                state: StorePhase::Ready
            })
        );
    }
}
