use tracing::{info, warn};

use crate::core::{Dart, GameSettings, LegState, Player, PlayerId, TurnInput};
use crate::effects::EffectResolver;
use crate::error::{Error, Result};
use crate::rules::{self, commit_turn, judge, resume_leg, TurnOutcome, Verdict};
use crate::storage::{GameSnapshot, GameStore, MatchId, StoreError};

use super::{Detection, InitialState, TrackerOptions};

/// Result of a committed turn, including how its effects fared.
#[derive(Debug)]
pub struct TurnReport {
    pub outcome: TurnOutcome,
    /// Store failures, in effect order. The turn stands regardless.
    pub failures: Vec<StoreError>,
}

impl TurnReport {
    /// True if every effect reached the store.
    #[must_use]
    pub fn is_durable(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Scores one match against a store.
pub struct ScoreTracker<S: GameStore> {
    match_id: MatchId,
    settings: GameSettings,
    options: TrackerOptions,
    players: Vec<Player>,
    leg: LegState,
    input: TurnInput,
    store: S,
}

impl<S: GameStore> ScoreTracker<S> {
    /// Start a fresh match.
    ///
    /// Every player starts on the configured score with empty history.
    pub fn new<I, P, N>(
        match_id: MatchId,
        roster: I,
        settings: GameSettings,
        store: S,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (P, N)>,
        P: Into<PlayerId>,
        N: Into<String>,
    {
        settings.validate()?;
        let players: Vec<Player> = roster
            .into_iter()
            .map(|(id, name)| Player::new(id, name, settings.start()))
            .collect();
        if players.is_empty() {
            return Err(Error::NoPlayers);
        }
        let leg = LegState::new(&players);
        info!(
            "New match {} with {} players from {}",
            match_id,
            players.len(),
            settings.starting_score
        );
        Ok(Self {
            match_id,
            settings,
            options: TrackerOptions::default(),
            players,
            leg,
            input: TurnInput::new(),
            store,
        })
    }

    /// Pick a match back up from its persisted state.
    ///
    /// Remaining scores are recomputed from history, which must be a
    /// gap-free run of rounds per player.
    pub fn resume(match_id: MatchId, initial: InitialState, store: S) -> Result<Self> {
        let InitialState {
            mut players,
            settings,
            leg,
        } = initial;
        settings.validate()?;
        if players.is_empty() {
            return Err(Error::NoPlayers);
        }
        for player in &mut players {
            player.recompute_score(settings.start())?;
        }
        let leg = resume_leg(&players, leg.as_ref());
        info!("Resumed match {}", match_id);
        Ok(Self {
            match_id,
            settings,
            options: TrackerOptions::default(),
            players,
            leg,
            input: TurnInput::new(),
            store,
        })
    }

    /// Resume from whatever the store holds for `match_id`.
    ///
    /// Returns `Ok(None)` if nothing was saved.
    pub fn load(match_id: MatchId, store: S) -> Result<Option<Self>> {
        let saved = store.load_game(&match_id)?;
        match saved {
            Some(snapshot) => Self::resume(match_id, snapshot.into(), store).map(Some),
            None => Ok(None),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: TrackerOptions) -> Self {
        self.options = options;
        self
    }

    // === Dart entry ===

    /// Enter a face value as typed. An empty string clears the slot and
    /// everything after it.
    ///
    /// In per-dart mode a bust or finish commits the turn and the report is
    /// returned. A third value alone never commits: the turn waits for its
    /// multiplier or for `submit`.
    pub fn enter_value(&mut self, slot: usize, raw: &str) -> Result<Option<TurnReport>> {
        self.input.set_value(slot, raw)?;
        self.after_entry(false)
    }

    pub fn enter_multiplier(&mut self, slot: usize, raw: &str) -> Result<Option<TurnReport>> {
        self.input.set_multiplier(slot, raw)?;
        self.after_entry(true)
    }

    pub fn enter_dart(&mut self, slot: usize, dart: Dart) -> Result<Option<TurnReport>> {
        self.input.set_dart(slot, dart)?;
        self.after_entry(true)
    }

    fn after_entry(&mut self, commit_when_full: bool) -> Result<Option<TurnReport>> {
        if self.options.detection != Detection::PerDart || self.input.is_empty() {
            return Ok(None);
        }
        if (commit_when_full && self.input.is_full()) || self.turn_decided() {
            return self.submit().map(Some);
        }
        Ok(None)
    }

    /// Bust, or a finish that the rules accept.
    fn turn_decided(&self) -> bool {
        let Some(player) = self.leg.current_player(&self.players) else {
            return false;
        };
        matches!(
            judge(&self.settings, player, &self.input.darts()),
            Ok(Verdict::Bust | Verdict::Checkout)
        )
    }

    // === Turn commit ===

    /// Commit the entered darts for the current player.
    ///
    /// The input buffer is cleared either way. A rejected turn changes
    /// nothing else and comes back as `Error::Rejected`.
    pub fn submit(&mut self) -> Result<TurnReport> {
        let darts = self.input.darts();
        self.input.reset();

        let transition = match commit_turn(&self.leg, &self.players, &darts, &self.settings) {
            Ok(t) => t,
            Err(rejection) => {
                warn!("Turn rejected in match {}: {}", self.match_id, rejection);
                return Err(Error::Rejected(rejection));
            }
        };

        self.leg = transition.leg;
        self.players = transition.players;
        let failures =
            EffectResolver::failures(&mut self.store, &self.match_id, &transition.effects);

        Ok(TurnReport {
            outcome: transition.outcome,
            failures,
        })
    }

    /// Save the current state.
    pub fn save(&mut self) -> Result<()> {
        self.store.save_game(&self.match_id, &self.snapshot())?;
        Ok(())
    }

    /// Start the leg over with the same players and settings.
    ///
    /// Game points are kept, and a finished match becomes active again.
    /// The restarted state is saved; a store error is returned but the
    /// restart stands.
    pub fn restart_leg(&mut self) -> Result<()> {
        let (leg, players) = rules::restart_leg(&self.leg, &self.players, &self.settings);
        self.leg = leg;
        self.players = players;
        self.input.reset();
        info!("Restarted leg in match {}", self.match_id);
        self.save()
    }

    /// Clear the round-complete flag once the caller has shown it.
    pub fn acknowledge_round(&mut self) {
        self.leg.round_complete = false;
    }

    // === Accessors ===

    #[must_use]
    pub fn match_id(&self) -> &MatchId {
        &self.match_id
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn leg(&self) -> &LegState {
        &self.leg
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn options(&self) -> TrackerOptions {
        self.options
    }

    /// The player to throw, or `None` once the match is decided.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.leg.current_player(&self.players)
    }

    #[must_use]
    pub fn input(&self) -> &TurnInput {
        &self.input
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.leg.is_over()
    }

    /// Current state as it would be saved.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::new(&self.players, &self.leg, &self.settings)
    }

    /// Consume the tracker, handing back the store.
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StartingScore;
    use crate::rules::Rejection;
    use crate::storage::MemoryStore;

    fn tracker(settings: GameSettings) -> ScoreTracker<MemoryStore> {
        ScoreTracker::new(
            MatchId::new("m1"),
            [("a", "Alice"), ("b", "Bob")],
            settings,
            MemoryStore::new(),
        )
        .unwrap()
    }

    fn throw(t: &mut ScoreTracker<MemoryStore>, darts: &[(&str, &str)]) -> Result<TurnReport> {
        for (slot, (value, mult)) in darts.iter().enumerate() {
            t.enter_value(slot, value)?;
            t.enter_multiplier(slot, mult)?;
        }
        t.submit()
    }

    #[test]
    fn test_new_requires_players() {
        let empty: [(&str, &str); 0] = [];
        let settings = GameSettings::default();
        let err = ScoreTracker::new(MatchId::new("x"), empty, settings, MemoryStore::new());
        assert!(matches!(err, Err(Error::NoPlayers)));
    }

    #[test]
    fn test_new_rejects_zero_threshold() {
        let settings = GameSettings::default().with_game_point_threshold(0);
        let err = ScoreTracker::new(MatchId::new("x"), [("a", "A")], settings, MemoryStore::new());
        assert!(matches!(err, Err(Error::InvalidSettings(_))));
    }

    #[test]
    fn test_submit_saves_every_turn() {
        let mut t = tracker(GameSettings::default());
        let report = throw(&mut t, &[("20", "3"), ("20", "3"), ("20", "3")]).unwrap();

        assert!(report.is_durable());
        assert_eq!(t.players()[0].score, 321);
        assert_eq!(t.current_player().unwrap().name, "Bob");
        assert!(t.input().is_empty());
        assert_eq!(t.store().saves(t.match_id()).len(), 1);
    }

    #[test]
    fn test_rejection_resets_input_only() {
        let mut t = tracker(GameSettings::default());
        let before = t.snapshot();
        let err = t.submit().unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::NoDarts));
        assert_eq!(t.snapshot(), before);
    }

    #[test]
    fn test_failed_double_out_reported() {
        let mut t = tracker(GameSettings::default().with_starting_score(StartingScore::S101));
        throw(&mut t, &[("20", "3"), ("1", "1")]).unwrap(); // Alice 40
        throw(&mut t, &[("1", "1")]).unwrap();

        let err = throw(&mut t, &[("20", "1"), ("20", "1")]).unwrap_err();
        assert!(matches!(err.rejection(), Some(Rejection::NeedsDoubleOut { .. })));
        assert_eq!(err.to_string(), "Alice needs to finish on a double!");
        assert_eq!(t.players()[0].score, 40);
        assert_eq!(t.current_player().unwrap().name, "Alice");
    }

    #[test]
    fn test_store_failure_keeps_turn() {
        let mut t = tracker(GameSettings::default());
        t.store_mut().fail_writes(true);

        let report = throw(&mut t, &[("20", "1")]).unwrap();
        assert!(!report.is_durable());
        assert_eq!(t.players()[0].score, 481);

        t.store_mut().fail_writes(false);
        t.save().unwrap();
        let saved = t.store().load_game(t.match_id()).unwrap().unwrap();
        assert_eq!(saved.players[0].score, 481);
    }

    #[test]
    fn test_per_dart_bust_commits() {
        let mut t = tracker(GameSettings::default().with_starting_score(StartingScore::S101))
            .with_options(TrackerOptions::default().with_detection(Detection::PerDart));
        t.enter_multiplier(0, "3").unwrap();
        t.enter_value(0, "20").unwrap();
        t.enter_value(1, "20").unwrap();
        assert!(t.enter_value(2, "1").unwrap().is_none());
        let report = t.enter_multiplier(2, "1").unwrap().unwrap(); // third dart
        assert!(matches!(report.outcome, TurnOutcome::Scored { remaining: 20, .. }));

        for slot in 0..3 {
            assert!(t.enter_value(slot, "1").unwrap().is_none());
        }
        t.enter_multiplier(2, "1").unwrap().unwrap(); // Bob 98

        // Alice on 20: a triple 20 busts on the first dart
        t.enter_multiplier(0, "3").unwrap();
        let report = t.enter_value(0, "20").unwrap().unwrap();
        assert!(report.outcome.is_bust());
        assert_eq!(t.players()[0].score, 20);
        assert_eq!(t.players()[0].history.len(), 2);
        assert_eq!(t.current_player().unwrap().name, "Bob");
    }

    #[test]
    fn test_per_dart_checkout_and_failed_finish() {
        let mut t = tracker(GameSettings::default().with_starting_score(StartingScore::S101))
            .with_options(TrackerOptions::default().with_detection(Detection::PerDart));
        t.enter_dart(0, Dart::triple(20).unwrap()).unwrap();
        t.enter_dart(1, Dart::single(1).unwrap()).unwrap();
        t.enter_dart(2, Dart::single(0).unwrap()).unwrap().unwrap(); // Alice 40

        t.enter_dart(0, Dart::single(1).unwrap()).unwrap();
        t.enter_dart(1, Dart::single(1).unwrap()).unwrap();
        t.enter_dart(2, Dart::single(1).unwrap()).unwrap().unwrap(); // Bob 98

        // 40 with a single 20 then another: no auto-commit on the failed finish
        assert!(t.enter_dart(0, Dart::single(20).unwrap()).unwrap().is_none());
        assert!(t.enter_dart(1, Dart::single(20).unwrap()).unwrap().is_none());
        assert_eq!(t.input().thrown(), 2);

        t.enter_value(1, "").unwrap();
        let report = t.enter_dart(1, Dart::double(10).unwrap()).unwrap().unwrap();
        assert!(matches!(report.outcome, TurnOutcome::MatchWon { .. }));
        assert!(t.is_over());
        assert!(t.store().is_complete(t.match_id()));
    }

    #[test]
    fn test_per_dart_third_value_waits_for_multiplier() {
        let mut t = tracker(GameSettings::default())
            .with_options(TrackerOptions::default().with_detection(Detection::PerDart));
        for (slot, value) in ["20", "20"].into_iter().enumerate() {
            t.enter_value(slot, value).unwrap();
            t.enter_multiplier(slot, "3").unwrap();
        }
        assert!(t.enter_value(2, "20").unwrap().is_none());
        assert_eq!(t.input().thrown(), 3);

        let report = t.enter_multiplier(2, "3").unwrap().unwrap();
        assert!(matches!(report.outcome, TurnOutcome::Scored { remaining: 321, .. }));
        let last = t.players()[0].history.back().unwrap();
        assert_eq!(last.darts[2], Dart::triple(20).unwrap());
    }

    #[test]
    fn test_restart_keeps_game_points() {
        let settings = GameSettings::default()
            .with_starting_score(StartingScore::S101)
            .with_double_out(false)
            .with_game_point_threshold(2);
        let mut t = tracker(settings);
        throw(&mut t, &[("20", "3"), ("20", "2"), ("1", "1")]).unwrap();
        assert_eq!(t.leg().game_points.get(&PlayerId::new("a")), 1);

        throw(&mut t, &[("20", "1")]).unwrap();
        t.restart_leg().unwrap();
        assert_eq!(t.leg().round, 1);
        assert!(t.players().iter().all(|p| p.score == 101));
        assert_eq!(t.leg().game_points.get(&PlayerId::new("a")), 1);
    }

    #[test]
    fn test_acknowledge_round() {
        let mut t = tracker(GameSettings::default());
        throw(&mut t, &[("1", "1")]).unwrap();
        throw(&mut t, &[("1", "1")]).unwrap();
        assert!(t.leg().round_complete);
        t.acknowledge_round();
        assert!(!t.leg().round_complete);
        assert_eq!(t.leg().round, 2);
    }

    #[test]
    fn test_load_from_store() {
        let mut t = tracker(GameSettings::default());
        throw(&mut t, &[("20", "1")]).unwrap();
        let store = t.into_store();

        let resumed = ScoreTracker::load(MatchId::new("m1"), store).unwrap().unwrap();
        assert_eq!(resumed.players()[0].score, 481);
        assert_eq!(resumed.current_player().unwrap().name, "Bob");

        assert!(ScoreTracker::load(MatchId::new("other"), MemoryStore::new())
            .unwrap()
            .is_none());
    }
}
