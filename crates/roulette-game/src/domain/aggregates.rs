//! Aggregate root for the game context.

use roulette_catalog::domain::catalog::{Catalogs, GenderTag};
use roulette_core::aggregate::AggregateRoot;
use roulette_core::clock::Clock;
use roulette_core::error::DomainError;
use roulette_core::event::EventMetadata;
use roulette_core::rng::DeterministicRng;
use uuid::Uuid;

use super::countdown::Countdown;
use super::counters::ParticipationCounters;
use super::events::{
    CountdownRerolled, GameCreated, GameEvent, GameEventKind, JokerChanged, LevelAdvanced,
    LevelNotice, LevelSelected, ParticipantRegistered, ParticipantRemoved, RosterPopulated,
    RoundSpun,
};
use super::groups::{GroupAssignment, form_groups};
use super::levels::{
    FINAL_LEVEL_INDEX, LEVEL_COUNT, Level, TransitionEffect, level, transition_announcement,
    transition_effect,
};
use super::narration::{UNDRESS_VERB, generate_narration};
use super::participant::{Participant, generate_roster};
use super::round::{RoundOutcome, generate_joker_round, generate_round, roll_countdown};
use crate::config::GameConfig;

/// The aggregate root for one game session.
///
/// Command methods compute every effect against the current state before
/// queueing any event, so a failing command leaves no uncommitted events.
#[derive(Debug)]
pub struct GameSession {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    pub(crate) roster: Vec<Participant>,
    pub(crate) level_index: usize,
    pub(crate) counters: ParticipationCounters,
    pub(crate) outcome: RoundOutcome,
    pub(crate) groups: Option<GroupAssignment>,
    pub(crate) notice: Option<LevelNotice>,
    /// Uncommitted events pending persistence.
    uncommitted_events: Vec<GameEvent>,
}

impl GameSession {
    /// Creates an empty game session at level 1.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            roster: Vec::new(),
            level_index: 0,
            counters: ParticipationCounters::default(),
            outcome: RoundOutcome::Empty,
            groups: None,
            notice: None,
            uncommitted_events: Vec::new(),
        }
    }

    /// Registered participants, in registration order.
    #[must_use]
    pub fn roster(&self) -> &[Participant] {
        &self.roster
    }

    /// Zero-based index of the active level.
    #[must_use]
    pub fn level_index(&self) -> usize {
        self.level_index
    }

    /// Participation counters.
    #[must_use]
    pub fn counters(&self) -> &ParticipationCounters {
        &self.counters
    }

    /// Outcome of the last spin.
    #[must_use]
    pub fn outcome(&self) -> &RoundOutcome {
        &self.outcome
    }

    /// Groups of the final level, when it is active.
    #[must_use]
    pub fn groups(&self) -> Option<&GroupAssignment> {
        self.groups.as_ref()
    }

    /// Announcement of the last level transition, until the next spin.
    #[must_use]
    pub fn notice(&self) -> Option<&LevelNotice> {
        self.notice.as_ref()
    }

    /// Returns the next sequence number for a new event.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version + self.uncommitted_events.len() as i64 + 1
    }

    fn record(&mut self, kind: GameEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let metadata = EventMetadata::for_command(
            kind.event_type(),
            self.id,
            self.next_sequence_number(),
            correlation_id,
            clock.now(),
        );
        self.uncommitted_events.push(GameEvent { metadata, kind });
    }

    fn active_level(&self) -> Result<&'static Level, DomainError> {
        level(self.level_index).ok_or_else(|| {
            DomainError::Infrastructure(format!("level index {} out of range", self.level_index))
        })
    }

    fn ensure_playable(&self, config: &GameConfig) -> Result<(), DomainError> {
        if self.roster.len() < config.min_participants {
            return Err(DomainError::InsufficientParticipants {
                required: config.min_participants,
                available: self.roster.len(),
            });
        }
        Ok(())
    }

    /// Starts the session, producing a `GameCreated` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the session already has events.
    pub fn create(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        if self.version > 0 || !self.uncommitted_events.is_empty() {
            return Err(DomainError::Validation(format!(
                "game {} already exists",
                self.id
            )));
        }
        let kind = GameEventKind::GameCreated(GameCreated { game_id: self.id });
        self.record(kind, correlation_id, clock);
        Ok(())
    }

    /// Registers a participant, producing a `ParticipantRegistered` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the trimmed name is empty, the
    /// roster is full, or the name is already taken (ignoring case).
    pub fn add_participant(
        &mut self,
        name: &str,
        gender_tag: GenderTag,
        accepts_same_gender: bool,
        config: &GameConfig,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation(
                "participant name must not be empty".to_owned(),
            ));
        }
        if self.roster.len() >= config.max_participants {
            return Err(DomainError::Validation(format!(
                "the roster is full ({} participants)",
                config.max_participants
            )));
        }
        if self.roster.iter().any(|p| p.has_name(name)) {
            return Err(DomainError::Validation(format!(
                "a participant named {name:?} already exists"
            )));
        }

        let participant = Participant::new(name, gender_tag, accepts_same_gender);
        let kind = GameEventKind::ParticipantRegistered(ParticipantRegistered { participant });
        self.record(kind, correlation_id, clock);
        Ok(())
    }

    /// Removes the participant at `index`, producing a `ParticipantRemoved`
    /// event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `index` is out of range.
    pub fn remove_participant(
        &mut self,
        index: usize,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        let Some(participant) = self.roster.get(index) else {
            return Err(DomainError::Validation(format!(
                "no participant at index {index} (roster has {})",
                self.roster.len()
            )));
        };
        let kind = GameEventKind::ParticipantRemoved(ParticipantRemoved {
            index,
            name: participant.name.clone(),
        });
        self.record(kind, correlation_id, clock);
        Ok(())
    }

    /// Replaces the roster with `count` generated participants, producing a
    /// `RosterPopulated` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `count` is outside the allowed
    /// roster size.
    pub fn auto_populate(
        &mut self,
        count: usize,
        config: &GameConfig,
        correlation_id: Uuid,
        clock: &dyn Clock,
        rng: &mut dyn DeterministicRng,
    ) -> Result<(), DomainError> {
        let participants = generate_roster(
            count,
            config.min_participants,
            config.max_participants,
            rng,
        )?;
        let kind = GameEventKind::RosterPopulated(RosterPopulated { participants });
        self.record(kind, correlation_id, clock);
        Ok(())
    }

    /// Jumps to a level, producing a `LevelSelected` event. Selecting the
    /// final level forms fresh groups and rolls their countdown.
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation` if `level_index` does not name a level.
    /// - `DomainError::InsufficientParticipants` or
    ///   `DomainError::EmptyCatalog` from group formation.
    pub fn select_level(
        &mut self,
        level_index: usize,
        catalogs: &Catalogs,
        config: &GameConfig,
        correlation_id: Uuid,
        clock: &dyn Clock,
        rng: &mut dyn DeterministicRng,
    ) -> Result<(), DomainError> {
        if level(level_index).is_none() {
            return Err(DomainError::Validation(format!(
                "level index must be below {LEVEL_COUNT}, got {level_index}"
            )));
        }

        let (groups, countdown_seconds) = if level_index == FINAL_LEVEL_INDEX {
            let groups = form_groups(&self.roster, catalogs, rng)?;
            (Some(groups), Some(roll_countdown(config, rng)))
        } else {
            (None, None)
        };

        let kind = GameEventKind::LevelSelected(LevelSelected {
            level_index,
            groups,
            countdown_seconds,
        });
        self.record(kind, correlation_id, clock);
        Ok(())
    }

    /// Plays one round.
    ///
    /// Below the final level this produces a `RoundSpun` event, followed by
    /// a `LevelAdvanced` event when a participant completes the level. At
    /// the final level it only re-rolls the group countdown
    /// (`CountdownRerolled`).
    ///
    /// # Errors
    ///
    /// - `DomainError::InsufficientParticipants` if the roster is too small,
    ///   or a joker needs more participants than there are.
    /// - `DomainError::NoValidCombination` and `DomainError::EmptyCatalog`
    ///   from round generation.
    /// - `DomainError::NoCompatibleActor` if the level transition's
    ///   narration cannot be generated; the round is then not played either.
    pub fn spin(
        &mut self,
        catalogs: &Catalogs,
        config: &GameConfig,
        correlation_id: Uuid,
        clock: &dyn Clock,
        rng: &mut dyn DeterministicRng,
    ) -> Result<(), DomainError> {
        self.ensure_playable(config)?;

        if self.level_index == FINAL_LEVEL_INDEX {
            let seconds = roll_countdown(config, rng);
            let kind = GameEventKind::CountdownRerolled(CountdownRerolled { seconds });
            self.record(kind, correlation_id, clock);
            return Ok(());
        }

        let level = self.active_level()?;
        let outcome = generate_round(level, &self.roster, catalogs, config, rng)?;

        let advancement = match &outcome {
            RoundOutcome::Standard {
                participant1,
                participant2,
                ..
            } => {
                let mut projected = self.counters.clone();
                projected.increment(participant1, level.index);
                projected.increment(participant2, level.index);
                if projected.any_reached(level.index, config.advancement_threshold) {
                    Some(self.plan_advancement(level.index, catalogs, config, rng)?)
                } else {
                    None
                }
            }
            _ => None,
        };

        let spun = GameEventKind::RoundSpun(RoundSpun {
            level_index: level.index,
            outcome,
        });
        self.record(spun, correlation_id, clock);
        if let Some(advanced) = advancement {
            self.record(GameEventKind::LevelAdvanced(advanced), correlation_id, clock);
        }
        Ok(())
    }

    fn plan_advancement(
        &self,
        from: usize,
        catalogs: &Catalogs,
        config: &GameConfig,
        rng: &mut dyn DeterministicRng,
    ) -> Result<LevelAdvanced, DomainError> {
        let notice = |narration| {
            transition_announcement(from).map(|(title, message)| LevelNotice {
                title: title.to_owned(),
                message: message.to_owned(),
                narration,
            })
        };

        let mut advanced = LevelAdvanced {
            from,
            to: from + 1,
            notice: None,
            groups: None,
            countdown_seconds: None,
        };
        match transition_effect(from) {
            TransitionEffect::None => {}
            TransitionEffect::Narration(state) => {
                let lines = generate_narration(&self.roster, UNDRESS_VERB, state, rng)?;
                advanced.notice = notice(lines);
            }
            TransitionEffect::Groups => {
                advanced.groups = Some(form_groups(&self.roster, catalogs, rng)?);
                advanced.countdown_seconds = Some(roll_countdown(config, rng));
                advanced.notice = notice(Vec::new());
            }
        }
        Ok(advanced)
    }

    /// Replaces the current joker with a different one, producing a
    /// `JokerChanged` event.
    ///
    /// Draws up to `max_attempts` jokers looking for a different text and
    /// keeps the last filled draw if every one matched the current joker. A
    /// template the roster cannot fill only costs an attempt.
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation` if the current outcome is not a joker.
    /// - `DomainError::InsufficientParticipants` or
    ///   `DomainError::NoValidCombination` if no draw could be filled.
    /// - `DomainError::EmptyCatalog` if the level has no joker templates.
    pub fn change_joker(
        &mut self,
        catalogs: &Catalogs,
        config: &GameConfig,
        correlation_id: Uuid,
        clock: &dyn Clock,
        rng: &mut dyn DeterministicRng,
    ) -> Result<(), DomainError> {
        let RoundOutcome::Joker {
            challenge_text: current,
            ..
        } = &self.outcome
        else {
            return Err(DomainError::Validation(
                "the current round is not a joker".to_owned(),
            ));
        };
        let current = current.clone();
        let level = self.active_level()?;

        let same_text = |outcome: &RoundOutcome| {
            matches!(outcome, RoundOutcome::Joker { challenge_text, .. } if *challenge_text == current)
        };
        let mut drawn = None;
        let mut rejected = None;
        for _ in 0..config.max_attempts.max(1) {
            match generate_joker_round(level, &self.roster, catalogs, config, rng) {
                Ok(outcome) => {
                    let fresh = !same_text(&outcome);
                    drawn = Some(outcome);
                    if fresh {
                        break;
                    }
                }
                Err(
                    e @ (DomainError::InsufficientParticipants { .. }
                    | DomainError::NoValidCombination(_)),
                ) => rejected = Some(e),
                Err(e) => return Err(e),
            }
        }
        let Some(drawn) = drawn else {
            return Err(rejected.unwrap_or_else(|| {
                DomainError::NoValidCombination(format!("no joker for {} could be filled", level.id))
            }));
        };

        let kind = GameEventKind::JokerChanged(JokerChanged { outcome: drawn });
        self.record(kind, correlation_id, clock);
        Ok(())
    }

    /// Countdown for the current outcome.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if there is no outcome with a
    /// countdown.
    pub fn countdown(&self) -> Result<Countdown, DomainError> {
        match self.outcome.countdown_seconds() {
            Some(seconds) if seconds > 0 => Ok(Countdown::start(seconds)),
            _ => Err(DomainError::Validation(
                "there is no round with a countdown to start".to_owned(),
            )),
        }
    }

    fn reset_progress(&mut self) {
        self.level_index = 0;
        self.counters = ParticipationCounters::for_roster(&self.roster);
        self.outcome = RoundOutcome::Empty;
        self.groups = None;
        self.notice = None;
    }
}

impl AggregateRoot for GameSession {
    type Event = GameEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            GameEventKind::GameCreated(_) => {}
            GameEventKind::ParticipantRegistered(payload) => {
                self.roster.push(payload.participant.clone());
                self.reset_progress();
            }
            GameEventKind::ParticipantRemoved(payload) => {
                if payload.index < self.roster.len() {
                    self.roster.remove(payload.index);
                }
                self.reset_progress();
            }
            GameEventKind::RosterPopulated(payload) => {
                self.roster.clone_from(&payload.participants);
                self.reset_progress();
            }
            GameEventKind::RoundSpun(payload) => {
                if let RoundOutcome::Standard {
                    participant1,
                    participant2,
                    ..
                } = &payload.outcome
                {
                    self.counters.increment(participant1, payload.level_index);
                    self.counters.increment(participant2, payload.level_index);
                }
                self.outcome = payload.outcome.clone();
                self.notice = None;
            }
            GameEventKind::LevelAdvanced(payload) => {
                self.counters.reset_level(payload.from);
                self.level_index = payload.to;
                self.outcome = payload
                    .countdown_seconds
                    .map_or(RoundOutcome::Empty, |countdown_seconds| {
                        RoundOutcome::Fusion { countdown_seconds }
                    });
                self.groups.clone_from(&payload.groups);
                self.notice.clone_from(&payload.notice);
            }
            GameEventKind::LevelSelected(payload) => {
                self.counters.reset_all();
                self.level_index = payload.level_index;
                self.outcome = payload
                    .countdown_seconds
                    .map_or(RoundOutcome::Empty, |countdown_seconds| {
                        RoundOutcome::Fusion { countdown_seconds }
                    });
                self.groups.clone_from(&payload.groups);
                self.notice = None;
            }
            GameEventKind::JokerChanged(payload) => {
                self.outcome = payload.outcome.clone();
            }
            GameEventKind::CountdownRerolled(payload) => {
                self.outcome = RoundOutcome::Fusion {
                    countdown_seconds: payload.seconds,
                };
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use roulette_catalog::domain::catalog::{
        Catalogs, GenderTag, JokerCatalog, JokerTemplate, PlayersNeeded, Tier,
    };
    use roulette_core::aggregate::AggregateRoot;
    use roulette_core::error::DomainError;
    use roulette_test_support::{CyclingRng, MockRng, SequenceRng, fixed_clock};
    use uuid::Uuid;

    use super::GameSession;
    use crate::config::GameConfig;
    use crate::domain::events::{GameEventKind, LevelNotice};
    use crate::domain::narration::TargetState;
    use crate::domain::round::RoundOutcome;

    fn session_with(players: &[(&str, GenderTag, bool)]) -> GameSession {
        let clock = fixed_clock();
        let config = GameConfig::default();
        let mut session = GameSession::new(Uuid::new_v4());
        session.create(Uuid::new_v4(), &clock).unwrap();
        for (name, tag, accepts) in players {
            session
                .add_participant(name, *tag, *accepts, &config, Uuid::new_v4(), &clock)
                .unwrap();
        }
        session.commit();
        session
    }

    fn alice_and_bob() -> GameSession {
        session_with(&[("Alice", GenderTag::B, false), ("Bob", GenderTag::A, false)])
    }

    fn joker_template(id: &str, template: &str, players_needed: PlayersNeeded) -> JokerTemplate {
        JokerTemplate {
            id: id.to_owned(),
            template: template.to_owned(),
            players_needed,
            accessories: Vec::new(),
        }
    }

    fn with_level_one_jokers(templates: Vec<JokerTemplate>) -> Catalogs {
        Catalogs {
            joker_challenges: JokerCatalog(BTreeMap::from([("level1".to_owned(), templates)])),
            ..Catalogs::default()
        }
    }

    fn showing_joker(session: &mut GameSession, text: &str) {
        session.outcome = RoundOutcome::Joker {
            challenge_id: "current".to_owned(),
            challenge_text: text.to_owned(),
            participants: Vec::new(),
            accessories: Vec::new(),
            countdown_seconds: 10,
        };
    }

    fn spin(session: &mut GameSession, rng: &mut CyclingRng) {
        session
            .spin(
                &Catalogs::default(),
                &GameConfig::default(),
                Uuid::new_v4(),
                &fixed_clock(),
                rng,
            )
            .unwrap();
        session.commit();
    }

    #[test]
    fn test_create_twice_is_rejected() {
        // Arrange
        let mut session = alice_and_bob();

        // Act
        let result = session.create(Uuid::new_v4(), &fixed_clock());

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(session.uncommitted_events().is_empty());
    }

    #[test]
    fn test_add_participant_trims_name() {
        // Arrange
        let mut session = session_with(&[]);

        // Act
        session
            .add_participant(
                "  Carol ",
                GenderTag::B,
                true,
                &GameConfig::default(),
                Uuid::new_v4(),
                &fixed_clock(),
            )
            .unwrap();
        session.commit();

        // Assert
        assert_eq!(session.roster()[0].name, "Carol");
        assert_eq!(session.version(), 2);
    }

    #[test]
    fn test_add_participant_rejects_blank_and_duplicate_names() {
        // Arrange
        let mut session = alice_and_bob();
        let config = GameConfig::default();
        let clock = fixed_clock();

        // Act
        let blank = session.add_participant("   ", GenderTag::A, true, &config, Uuid::new_v4(), &clock);
        let duplicate =
            session.add_participant("ALICE", GenderTag::A, true, &config, Uuid::new_v4(), &clock);

        // Assert
        assert!(matches!(blank, Err(DomainError::Validation(_))));
        assert!(matches!(duplicate, Err(DomainError::Validation(_))));
        assert!(session.uncommitted_events().is_empty());
    }

    #[test]
    fn test_add_participant_rejects_full_roster() {
        // Arrange
        let mut session = alice_and_bob();
        let config = GameConfig {
            max_participants: 2,
            ..GameConfig::default()
        };

        // Act
        let result = session.add_participant(
            "Carol",
            GenderTag::B,
            true,
            &config,
            Uuid::new_v4(),
            &fixed_clock(),
        );

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_remove_participant_out_of_range_is_rejected() {
        let mut session = alice_and_bob();

        let result = session.remove_participant(2, Uuid::new_v4(), &fixed_clock());

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_roster_change_resets_level_and_counters() {
        // Arrange
        let mut session = session_with(&[
            ("Alice", GenderTag::B, false),
            ("Bob", GenderTag::A, false),
            ("Carol", GenderTag::B, false),
        ]);
        session
            .select_level(
                3,
                &Catalogs::default(),
                &GameConfig::default(),
                Uuid::new_v4(),
                &fixed_clock(),
                &mut MockRng,
            )
            .unwrap();
        session.commit();
        assert_eq!(session.level_index(), 3);

        // Act
        session
            .remove_participant(2, Uuid::new_v4(), &fixed_clock())
            .unwrap();
        session.commit();

        // Assert
        assert_eq!(session.level_index(), 0);
        assert_eq!(session.roster().len(), 2);
        assert_eq!(session.counters().count("Carol", 0), 0);
        assert_eq!(session.outcome(), &RoundOutcome::Empty);
    }

    #[test]
    fn test_spin_with_one_participant_is_insufficient() {
        // Arrange
        let mut session = session_with(&[("Alice", GenderTag::B, true)]);

        // Act
        let result = session.spin(
            &Catalogs::default(),
            &GameConfig::default(),
            Uuid::new_v4(),
            &fixed_clock(),
            &mut CyclingRng::standard_only(),
        );

        // Assert
        match result {
            Err(DomainError::InsufficientParticipants {
                required,
                available,
            }) => {
                assert_eq!(required, 2);
                assert_eq!(available, 1);
            }
            other => panic!("expected InsufficientParticipants, got {other:?}"),
        }
        assert!(session.uncommitted_events().is_empty());
    }

    #[test]
    fn test_five_standard_rounds_advance_and_zero_the_level_counters() {
        // Arrange
        let mut session = alice_and_bob();
        let mut rng = CyclingRng::standard_only();

        // Act
        for _ in 0..4 {
            spin(&mut session, &mut rng);
        }
        assert_eq!(session.level_index(), 0);
        assert_eq!(session.counters().count("Alice", 0), 4);
        session
            .spin(
                &Catalogs::default(),
                &GameConfig::default(),
                Uuid::new_v4(),
                &fixed_clock(),
                &mut rng,
            )
            .unwrap();

        // Assert
        let kinds: Vec<_> = session
            .uncommitted_events()
            .iter()
            .map(|e| e.kind.event_type())
            .collect();
        assert_eq!(kinds, ["game.round_spun", "game.level_advanced"]);

        session.commit();
        assert_eq!(session.level_index(), 1);
        assert_eq!(session.counters().count("Alice", 0), 0);
        assert_eq!(session.counters().count("Bob", 0), 0);
        assert!(session.notice().is_none());
    }

    #[test]
    fn test_completing_level_two_narrates_both_participants() {
        // Arrange
        let mut session = alice_and_bob();
        let mut rng = CyclingRng::standard_only();

        // Act
        for _ in 0..10 {
            spin(&mut session, &mut rng);
        }

        // Assert
        assert_eq!(session.level_index(), 2);
        let notice = session.notice().unwrap();
        assert_eq!(notice.title, "Level 2 complete: down to underwear!");
        assert_eq!(notice.narration.len(), 2);
        let mut targets: Vec<_> = notice.narration.iter().map(|l| l.target.as_str()).collect();
        targets.sort_unstable();
        assert_eq!(targets, ["Alice", "Bob"]);
        assert!(notice.narration.iter().all(|l| l.actor != l.target));
    }

    #[test]
    fn test_failed_narration_aborts_the_spin() {
        // Arrange: Max refuses his own tag and nobody else has the other one.
        let mut session = session_with(&[
            ("Tom", GenderTag::A, true),
            ("Sam", GenderTag::A, true),
            ("Max", GenderTag::A, false),
        ]);
        let config = GameConfig {
            advancement_threshold: 1,
            ..GameConfig::default()
        };
        session
            .select_level(
                1,
                &Catalogs::default(),
                &config,
                Uuid::new_v4(),
                &fixed_clock(),
                &mut MockRng,
            )
            .unwrap();
        session.commit();
        let version = session.version();

        // Act
        let result = session.spin(
            &Catalogs::default(),
            &config,
            Uuid::new_v4(),
            &fixed_clock(),
            &mut CyclingRng::standard_only(),
        );

        // Assert
        match result {
            Err(DomainError::NoCompatibleActor { target }) => assert_eq!(target, "Max"),
            other => panic!("expected NoCompatibleActor, got {other:?}"),
        }
        assert!(session.uncommitted_events().is_empty());
        assert_eq!(session.version(), version);
        assert_eq!(session.level_index(), 1);
    }

    #[test]
    fn test_select_level_rejects_unknown_level() {
        let mut session = alice_and_bob();

        let result = session.select_level(
            6,
            &Catalogs::default(),
            &GameConfig::default(),
            Uuid::new_v4(),
            &fixed_clock(),
            &mut MockRng,
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_select_final_level_forms_groups_and_spin_rerolls_countdown() {
        // Arrange
        let mut session = alice_and_bob();
        let mut rng = CyclingRng::standard_only();
        session
            .select_level(
                5,
                &Catalogs::default(),
                &GameConfig::default(),
                Uuid::new_v4(),
                &fixed_clock(),
                &mut rng,
            )
            .unwrap();
        session.commit();

        // Act
        session
            .spin(
                &Catalogs::default(),
                &GameConfig::default(),
                Uuid::new_v4(),
                &fixed_clock(),
                &mut rng,
            )
            .unwrap();

        // Assert
        let events = session.uncommitted_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0].kind, GameEventKind::CountdownRerolled(_)));
        session.commit();
        assert_eq!(session.level_index(), 5);
        let groups = session.groups().unwrap();
        assert_eq!(groups.groups.len(), 1);
        assert!(groups.soloists.is_empty());
        assert!(matches!(session.outcome(), RoundOutcome::Fusion { .. }));
    }

    #[test]
    fn test_select_final_level_with_one_participant_is_insufficient() {
        let mut session = session_with(&[("Alice", GenderTag::B, true)]);

        let result = session.select_level(
            5,
            &Catalogs::default(),
            &GameConfig::default(),
            Uuid::new_v4(),
            &fixed_clock(),
            &mut MockRng,
        );

        assert!(matches!(
            result,
            Err(DomainError::InsufficientParticipants { .. })
        ));
    }

    #[test]
    fn test_change_joker_requires_a_joker() {
        let mut session = alice_and_bob();

        let result = session.change_joker(
            &Catalogs::default(),
            &GameConfig::default(),
            Uuid::new_v4(),
            &fixed_clock(),
            &mut MockRng,
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_change_joker_draws_a_different_challenge() {
        // Arrange
        let mut session = session_with(&[
            ("Alice", GenderTag::B, true),
            ("Bob", GenderTag::A, true),
            ("Eve", GenderTag::B, true),
            ("Dan", GenderTag::A, true),
        ]);
        let mut rng = CyclingRng::new(0.0);
        spin(&mut session, &mut rng);
        let RoundOutcome::Joker {
            challenge_text: before,
            ..
        } = session.outcome().clone()
        else {
            panic!("expected a joker, got {:?}", session.outcome());
        };

        // Act
        session
            .change_joker(
                &Catalogs::default(),
                &GameConfig::default(),
                Uuid::new_v4(),
                &fixed_clock(),
                &mut rng,
            )
            .unwrap();
        session.commit();

        // Assert
        match session.outcome() {
            RoundOutcome::Joker { challenge_text, .. } => assert_ne!(challenge_text, &before),
            other => panic!("expected a joker, got {other:?}"),
        }
        assert_eq!(session.counters().count("Alice", 0), 0);
    }

    #[test]
    fn test_change_joker_skips_templates_the_roster_cannot_fill() {
        // Arrange: a trio template comes up first on a two-player roster.
        let mut session = session_with(&[("Alice", GenderTag::B, true), ("Bob", GenderTag::A, true)]);
        showing_joker(&mut session, "**Old:** something else.");
        let catalogs = with_level_one_jokers(vec![
            joker_template("trio", "{player1}, {player2} and {player3} hug.", PlayersNeeded::Three),
            joker_template("duet", "{player1} sings to {player2}.", PlayersNeeded::Two),
        ]);
        // trio pick, duet pick, Alice, Bob, countdown step
        let mut rng = SequenceRng::new(vec![0, 1, 0, 1, 2]);

        // Act
        session
            .change_joker(
                &catalogs,
                &GameConfig::default(),
                Uuid::new_v4(),
                &fixed_clock(),
                &mut rng,
            )
            .unwrap();
        session.commit();

        // Assert
        match session.outcome() {
            RoundOutcome::Joker {
                challenge_id,
                challenge_text,
                countdown_seconds,
                ..
            } => {
                assert_eq!(challenge_id, "duet");
                assert_eq!(challenge_text, "Alice sings to Bob.");
                assert_eq!(*countdown_seconds, 10);
            }
            other => panic!("expected a joker, got {other:?}"),
        }
        assert_eq!(rng.consumed(), 5);
    }

    #[test]
    fn test_change_joker_fails_when_no_template_can_be_filled() {
        // Arrange
        let mut session = session_with(&[("Alice", GenderTag::B, true), ("Bob", GenderTag::A, true)]);
        showing_joker(&mut session, "**Old:** something else.");
        let catalogs = with_level_one_jokers(vec![joker_template(
            "trio",
            "{player1}, {player2} and {player3} hug.",
            PlayersNeeded::Three,
        )]);
        let config = GameConfig {
            max_attempts: 3,
            ..GameConfig::default()
        };

        // Act
        let result = session.change_joker(
            &catalogs,
            &config,
            Uuid::new_v4(),
            &fixed_clock(),
            &mut SequenceRng::new(vec![0, 0, 0]),
        );

        // Assert
        assert!(matches!(
            result,
            Err(DomainError::InsufficientParticipants {
                required: 3,
                available: 2
            })
        ));
        assert!(session.uncommitted_events().is_empty());
    }

    #[test]
    fn test_spinning_through_every_level_reaches_the_final_groups() {
        // Arrange
        let mut session = alice_and_bob();
        let mut rng = CyclingRng::standard_only();
        let mut notices: Vec<LevelNotice> = Vec::new();

        // Act
        for _ in 0..25 {
            spin(&mut session, &mut rng);
            if let Some(notice) = session.notice() {
                notices.push(notice.clone());
            }
        }

        // Assert
        let titles: Vec<&str> = notices.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Level 2 complete: down to underwear!",
                "Level 4 complete: fully undressed!",
                "Level 5 complete: ultimate fusion!",
            ]
        );
        let full: Vec<String> = notices[1].narration.iter().map(ToString::to_string).collect();
        assert_eq!(
            full,
            ["Bob undresses Alice completely.", "Alice undresses Bob completely."]
        );
        assert!(
            notices[1]
                .narration
                .iter()
                .all(|line| line.target_state == TargetState::Full)
        );
        assert!(notices[2].narration.is_empty());

        assert_eq!(session.level_index(), 5);
        let groups = session.groups().unwrap();
        assert_eq!(groups.groups.len(), 1);
        assert_eq!(groups.groups[0].members.len(), 2);
        assert!(groups.soloists.is_empty());
        assert!(matches!(session.outcome(), RoundOutcome::Fusion { .. }));
        assert_eq!(session.counters().count("Alice", 4), 0);
    }

    #[test]
    fn test_failed_group_formation_aborts_the_advancing_spin() {
        // Arrange
        let mut session = alice_and_bob();
        let mut catalogs = Catalogs::default();
        catalogs.actions.0.remove(&Tier::Fusion);
        let config = GameConfig {
            advancement_threshold: 1,
            ..GameConfig::default()
        };
        session
            .select_level(
                4,
                &catalogs,
                &config,
                Uuid::new_v4(),
                &fixed_clock(),
                &mut MockRng,
            )
            .unwrap();
        session.commit();
        let version = session.version();

        // Act
        let result = session.spin(
            &catalogs,
            &config,
            Uuid::new_v4(),
            &fixed_clock(),
            &mut CyclingRng::standard_only(),
        );

        // Assert
        assert!(matches!(result, Err(DomainError::EmptyCatalog(_))));
        assert!(session.uncommitted_events().is_empty());
        assert_eq!(session.version(), version);
        assert_eq!(session.level_index(), 4);
        assert!(session.groups().is_none());
        assert_eq!(session.outcome(), &RoundOutcome::Empty);
    }

    #[test]
    fn test_countdown_needs_an_outcome() {
        // Arrange
        let mut session = alice_and_bob();
        assert!(matches!(
            session.countdown(),
            Err(DomainError::Validation(_))
        ));

        // Act
        spin(&mut session, &mut CyclingRng::standard_only());

        // Assert
        let countdown = session.countdown().unwrap();
        assert_eq!(Some(countdown.total_seconds), session.outcome().countdown_seconds());
    }
}
