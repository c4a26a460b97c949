//! Game session controller.
//!
//! Validates player actions, runs them through the rule engine, keeps the
//! ledger, and persists the resulting snapshot with its version token.

pub mod dispatch;

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{debug, info};

use crate::config::session::SessionConfig;
use crate::domain::actions::{Action, SideBets};
use crate::domain::hand::{AvailableActions, Hand, Position};
use crate::domain::player_view::{project, PublicState};
use crate::domain::rules::RuleOverrides;
use crate::domain::session_id::SessionId;
use crate::domain::snapshot::{SessionMetadata, Snapshot};
use crate::domain::stage::Stage;
use crate::engine::RuleEngine;
use crate::errors::domain::{DomainError, NotFoundKind, StateKind};
use crate::repos::sessions::{SessionStore, StoredSession};

pub use dispatch::{plan, Planned};

/// One caller's session, bound to a store and a rule engine.
///
/// In-memory state only changes after the store accepted a write.
pub struct SessionController {
    id: SessionId,
    store: Arc<dyn SessionStore>,
    engine: Arc<dyn RuleEngine>,
    config: SessionConfig,
    current: Option<StoredSession>,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("id", &self.id)
            .field("version", &self.version())
            .field("stage", &self.stage())
            .finish()
    }
}

impl SessionController {
    /// Bind to `id`, loading whatever is stored. A missing or unreadable
    /// record leaves the controller empty.
    pub async fn open(
        id: SessionId,
        store: Arc<dyn SessionStore>,
        engine: Arc<dyn RuleEngine>,
        config: SessionConfig,
    ) -> Result<Self, DomainError> {
        let current = store.load(&id).await?;
        debug!(
            session_id = %id,
            found = current.is_some(),
            version = current.as_ref().map(|s| s.version),
            "session opened"
        );
        Ok(Self {
            id,
            store,
            engine,
            config,
            current,
        })
    }

    /// Like [`open`](Self::open) but fails when nothing is stored.
    pub async fn require(
        id: SessionId,
        store: Arc<dyn SessionStore>,
        engine: Arc<dyn RuleEngine>,
        config: SessionConfig,
    ) -> Result<Self, DomainError> {
        let controller = Self::open(id, store, engine, config).await?;
        if controller.current.is_none() {
            return Err(session_not_found(&controller.id));
        }
        Ok(controller)
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn version(&self) -> Option<i32> {
        self.current.as_ref().map(|s| s.version)
    }

    pub fn stage(&self) -> Option<Stage> {
        self.snapshot().map(|s| s.engine_state.stage)
    }

    /// Ledger balance, before deducting live stakes.
    pub fn money(&self) -> Option<i64> {
        self.snapshot().map(|s| s.money)
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.current.as_ref().map(|s| &s.snapshot)
    }

    pub fn stored(&self) -> Option<&StoredSession> {
        self.current.as_ref()
    }

    /// Deal a new round.
    ///
    /// Allowed when no session exists yet or the previous round is finished.
    /// A brand-new session starts with the configured money.
    pub async fn start(
        &mut self,
        bet: i64,
        side_bets: Option<SideBets>,
        rules: Option<RuleOverrides>,
    ) -> Result<PublicState, DomainError> {
        if bet <= 0 {
            return Err(DomainError::validation(format!(
                "bet must be positive, got {bet}"
            )));
        }
        let side_bets = side_bets.unwrap_or_default();
        if side_bets.lucky_lucky < 0 || side_bets.perfect_pairs < 0 {
            return Err(DomainError::validation("side bets must not be negative"));
        }
        let rules = rules.unwrap_or_default().resolve()?;

        let (money, metadata, expected_version) = match &self.current {
            Some(stored) => {
                let stage = stored.snapshot.engine_state.stage;
                if !matches!(stage, Stage::Done | Stage::Ready) {
                    return Err(DomainError::state(
                        StateKind::InProgress,
                        format!("a round is still in progress (stage {stage})"),
                    ));
                }
                (
                    stored.snapshot.money,
                    stored.snapshot.metadata.clone(),
                    Some(stored.version),
                )
            }
            None => (
                self.config.starting_money,
                SessionMetadata::new(OffsetDateTime::now_utc()),
                None,
            ),
        };

        let fresh = self.engine.new_game(rules);
        let action = Action::Deal { bet, side_bets };
        let planned = plan(self.engine.as_ref(), &fresh, money, &metadata, &action)?;
        self.commit(&action, planned, expected_version).await
    }

    pub async fn hit(&mut self, position: Position) -> Result<PublicState, DomainError> {
        self.play_hand(Action::Hit { position }, |a| a.hit).await
    }

    pub async fn stand(&mut self, position: Position) -> Result<PublicState, DomainError> {
        self.play_hand(Action::Stand { position }, |a| a.stand).await
    }

    pub async fn double(&mut self, position: Position) -> Result<PublicState, DomainError> {
        self.play_hand(Action::Double { position }, |a| a.double)
            .await
    }

    pub async fn split(&mut self) -> Result<PublicState, DomainError> {
        self.play_hand(Action::Split, |a| a.split).await
    }

    pub async fn surrender(&mut self) -> Result<PublicState, DomainError> {
        self.play_hand(Action::Surrender, |a| a.surrender).await
    }

    pub async fn insurance(&mut self, bet: i64) -> Result<PublicState, DomainError> {
        if bet < 0 {
            return Err(DomainError::validation(format!(
                "insurance bet must not be negative, got {bet}"
            )));
        }
        self.play_hand(Action::Insurance { bet }, |a| a.insurance)
            .await
    }

    pub async fn take_insurance(&mut self) -> Result<PublicState, DomainError> {
        self.insurance(1).await
    }

    pub async fn decline_insurance(&mut self) -> Result<PublicState, DomainError> {
        self.insurance(0).await
    }

    pub fn public_state(&self) -> Result<PublicState, DomainError> {
        let snapshot = self.snapshot().ok_or_else(|| session_not_found(&self.id))?;
        Ok(project(&snapshot.engine_state, snapshot.money))
    }

    /// Remove the stored session. Returns whether a record existed.
    pub async fn delete(&mut self) -> Result<bool, DomainError> {
        let removed = self.store.delete(&self.id).await?;
        self.current = None;
        info!(session_id = %self.id, removed, "session deleted");
        Ok(removed)
    }

    async fn play_hand(
        &mut self,
        action: Action,
        allowed: impl FnOnce(&AvailableActions) -> bool,
    ) -> Result<PublicState, DomainError> {
        let stored = self
            .current
            .as_ref()
            .ok_or_else(|| session_not_found(&self.id))?;
        let state = &stored.snapshot.engine_state;

        if state.stage.is_terminal() {
            return Err(DomainError::state(
                StateKind::Terminal,
                format!("round is {}; start a new game", state.stage),
            ));
        }

        let position = action.position();
        let hand: &Hand = state.hand(position).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Hand, format!("no {position} hand"))
        })?;
        if !allowed(&hand.available_actions) {
            return Err(DomainError::state(
                StateKind::ActionNotAvailable,
                format!("{} is not available on the {position} hand", action.kind()),
            ));
        }

        let planned = plan(
            self.engine.as_ref(),
            state,
            stored.snapshot.money,
            &stored.snapshot.metadata,
            &action,
        )?;
        let expected_version = Some(stored.version);
        self.commit(&action, planned, expected_version).await
    }

    async fn commit(
        &mut self,
        action: &Action,
        planned: Planned,
        expected_version: Option<i32>,
    ) -> Result<PublicState, DomainError> {
        let saved = self
            .store
            .save(&self.id, &planned.snapshot, expected_version)
            .await?;

        let state = &saved.snapshot.engine_state;
        info!(
            session_id = %self.id,
            action = action.kind(),
            stage = %state.stage,
            version = saved.version,
            money = saved.snapshot.money,
            "action dispatched"
        );
        // Only emitted once the write landed
        for transition in &planned.transitions {
            info!(
                session_id = %self.id,
                ?transition,
                version = saved.version,
                "session transition"
            );
        }
        if let Some(settlement) = planned.settlement {
            info!(
                session_id = %self.id,
                wagered = settlement.wagered,
                returned = settlement.returned,
                net = settlement.net(),
                "round settled"
            );
        }

        let view = project(state, saved.snapshot.money);
        self.current = Some(saved);
        Ok(view)
    }
}

fn session_not_found(id: &SessionId) -> DomainError {
    DomainError::not_found(NotFoundKind::Session, format!("no game for session {id}"))
}
