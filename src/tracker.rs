//! Dialogue state tracker
//!
//! The only writer of [`DialogueState`]. User and system actions are applied
//! through one dispatch loop: utterances go to the history, structured acts
//! are routed by intent to a handler chosen by an exhaustive `match`.
//!
//! Selecting or confirming an option replays the option as a synthesized
//! user utterance plus act, re-entering the loop on the same call stack.
//! Synthesized actions cannot themselves select or confirm options.

#[cfg(test)]
mod proptests;

use crate::dialogue::{
    option_text, slots, Action, Annotation, AnnotationValue, DialogueAct, Intent, Participant,
    SystemIntent, UserIntent, Utterance,
};
use crate::error::DialogueError;
use crate::event_bus::{EventBus, RequestRecommendations, RequestSuggestions, StyleChanged};
use crate::state::{DialogueState, Ranking, Style};

/// Ranked items kept per recommendation
pub const DEFAULT_TOP_K: usize = 10;

type Handler = fn(&mut DialogueStateTracker, &DialogueAct, Dispatch<'_>) -> Result<(), DialogueError>;

/// Context threaded through one pass of the dispatch loop
#[derive(Clone, Copy)]
struct Dispatch<'a> {
    bus: &'a EventBus,
    /// 0 for caller-supplied actions, 1 for actions synthesized from an option
    depth: usize,
}

impl Dispatch<'_> {
    fn is_synthesized(self) -> bool {
        self.depth > 0
    }
}

#[derive(Debug)]
pub struct DialogueStateTracker {
    state: DialogueState,
    top_k: usize,
}

impl Default for DialogueStateTracker {
    fn default() -> Self {
        Self::new(Style::Default, DEFAULT_TOP_K)
    }
}

impl DialogueStateTracker {
    pub fn new(style: Style, top_k: usize) -> Self {
        Self {
            state: DialogueState::new(style),
            top_k,
        }
    }

    pub fn state(&self) -> &DialogueState {
        &self.state
    }

    /// Replace the whole state, used to roll back a failed turn
    pub(crate) fn restore(&mut self, state: DialogueState) {
        self.state = state;
    }

    // ========================================================================
    // Turn entry points
    // ========================================================================

    /// Apply one turn of user actions
    ///
    /// Turn-scoped flags are reset first, so everything the handlers set is
    /// visible to the policy of this turn only.
    pub fn process_user_actions(
        &mut self,
        actions: Vec<Action>,
        bus: &EventBus,
    ) -> Result<(), DialogueError> {
        self.state.flags.reset();
        self.state.user_actions.clone_from(&actions);
        self.handle_actions(&actions, Dispatch { bus, depth: 0 })?;
        self.state.turn += 1;
        tracing::debug!(turn = self.state.turn, flags = ?self.state.flags, "User actions applied");
        Ok(())
    }

    /// Record the system output of a turn
    pub fn process_agent_actions(
        &mut self,
        actions: Vec<Action>,
        bus: &EventBus,
    ) -> Result<(), DialogueError> {
        self.state.system_actions.clone_from(&actions);
        self.handle_actions(&actions, Dispatch { bus, depth: 0 })
    }

    /// Fetch recommendations and topic suggestions, then refresh derived flags
    pub fn request_external_resources(&mut self, bus: &EventBus) -> Result<(), DialogueError> {
        let preferences = &self.state.preferences;

        if preferences.included().is_empty() {
            if !self.state.recommendation.is_empty() {
                tracing::debug!("No preferences left, clearing recommendation");
                self.state.recommendation.clear();
            }
        } else if self.state.flags.updated_preferences {
            let request = RequestRecommendations {
                included_topics: preferences.included_values(),
                excluded_topics: preferences.excluded_values(),
            };
            let ranking = bus.dispatch_with_response(&request)?;
            self.update_recommendations(ranking);
        }

        if !self.state.recommendation.is_empty() && self.state.topic_suggestions.is_empty() {
            let preferences = &self.state.preferences;
            let request = RequestSuggestions {
                included_topics: preferences.included_values(),
                excluded_topics: preferences.excluded_values(),
                recommended_items: self.state.recommendation.current().items().to_vec(),
                previously_suggested_topics: self
                    .state
                    .suggested_topics
                    .iter()
                    .filter_map(|a| a.value.as_text().map(str::to_string))
                    .collect(),
            };
            self.state.topic_suggestions = bus.dispatch_with_response(&request)?;
            tracing::debug!(count = self.state.topic_suggestions.len(), "Topic suggestions queued");
        }

        self.state.update_flags();
        Ok(())
    }

    fn update_recommendations(&mut self, ranking: Ranking) {
        self.state.recommendation.set(ranking.top_k(self.top_k));
        let recommendation = &self.state.recommendation;
        let overlap = recommendation.overlap();
        self.state.flags.new_recommendations = !recommendation.is_empty() && overlap < 1.0;
        tracing::info!(
            items = recommendation.current().len(),
            overlap,
            new = self.state.flags.new_recommendations,
            "Recommendation updated"
        );
    }

    // ========================================================================
    // Dispatch loop
    // ========================================================================

    fn handle_actions(&mut self, actions: &[Action], ctx: Dispatch<'_>) -> Result<(), DialogueError> {
        let mut reset_options = false;

        for action in actions {
            match action {
                Action::Utterance(utterance) => {
                    self.state.history.push(utterance.clone());
                    if utterance.participant == Participant::User {
                        self.state.flags.agent_should_respond = true;
                        reset_options = true;
                    }
                    if let Some(act) = &utterance.act {
                        self.handle_act(act, ctx)?;
                    }
                }
                Action::Act(act) => self.handle_act(act, ctx)?,
            }
        }

        if reset_options {
            self.reset_options();
        }
        Ok(())
    }

    fn handle_act(&mut self, act: &DialogueAct, ctx: Dispatch<'_>) -> Result<(), DialogueError> {
        let handler = match act.intent {
            Intent::User(intent) => Self::user_handler(intent),
            Intent::System(intent) => Self::system_handler(intent),
        };
        match handler {
            Some(handler) => {
                tracing::debug!(intent = %act.intent, depth = ctx.depth, "Handling act");
                handler(self, act, ctx)
            }
            None => {
                tracing::trace!(intent = %act.intent, "No state change for intent");
                Ok(())
            }
        }
    }

    fn user_handler(intent: UserIntent) -> Option<Handler> {
        match intent {
            UserIntent::RevealPreference => Some(Self::reveal_preference),
            UserIntent::RemovePreference => Some(Self::remove_preference),
            UserIntent::ResetPreferences => Some(Self::reset_preferences),
            UserIntent::GetKeyphraseExplanation => Some(Self::get_keyphrase_explanation),
            UserIntent::SelectOption => Some(Self::select_option),
            UserIntent::Confirm => Some(Self::confirm),
            UserIntent::AddBookmark => Some(Self::add_bookmark),
            UserIntent::RemoveBookmark => Some(Self::remove_bookmark),
            UserIntent::GetRecommendationExplanation => Some(Self::get_recommendation_explanation),
            UserIntent::SetStyle => Some(Self::set_style),
            UserIntent::Help
            | UserIntent::Ignore
            | UserIntent::Other
            | UserIntent::Closing
            | UserIntent::GetPreferences
            | UserIntent::Reject
            | UserIntent::GetTopicSuggestions
            | UserIntent::StartConversation
            | UserIntent::GetBookmarks => None,
        }
    }

    fn system_handler(intent: SystemIntent) -> Option<Handler> {
        match intent {
            SystemIntent::ProvideOptions => Some(Self::provide_options),
            SystemIntent::ProvideRecommendations => Some(Self::provide_recommendations),
            SystemIntent::ExplainKeyphrase => Some(Self::explain_keyphrase),
            SystemIntent::SuggestTopics => Some(Self::suggest_topics),
            SystemIntent::Initial
            | SystemIntent::Elicit
            | SystemIntent::InformPreferences
            | SystemIntent::SuggestRemovePreferences
            | SystemIntent::PromptAddToPreferences
            | SystemIntent::PromptToResetPreferences
            | SystemIntent::AcknowledgePreferenceUpdate
            | SystemIntent::AcknowledgePreferenceReset
            | SystemIntent::ExplainRecommendation
            | SystemIntent::Recommend
            | SystemIntent::InformHelp
            | SystemIntent::CantHelp
            | SystemIntent::Closing
            | SystemIntent::ProvideBookmarks => None,
        }
    }

    /// Invalidate the open options, telling the policy to re-advertise a menu
    fn reset_options(&mut self) {
        if !self.state.options.is_empty() {
            self.state.flags.should_reset_options = true;
            self.state.options.clear();
        }
    }

    // ========================================================================
    // User intent handlers
    // ========================================================================

    fn reveal_preference(&mut self, act: &DialogueAct, _ctx: Dispatch<'_>) -> Result<(), DialogueError> {
        let topics: Vec<Annotation> = act.annotations_for(slots::TOPIC).cloned().collect();
        let excluded: Vec<Annotation> = act.annotations_for(slots::EXCLUDE_TOPIC).cloned().collect();
        if topics.is_empty() && excluded.is_empty() {
            tracing::warn!(intent = %act.intent, "Missing topic annotation, ignoring");
            return Ok(());
        }

        if !topics.is_empty() {
            self.state.discussion_topics.clone_from(&topics);
        }

        if self.state.flags.awaiting_confirmation()
            && !self.state.unexplained_discussion_topics().is_empty()
        {
            tracing::debug!("Preference update deferred until confirmed");
            return Ok(());
        }

        let preferences = &mut self.state.preferences;
        let mut changed = false;
        for topic in &topics {
            changed |= preferences.include(&topic.value);
        }
        for topic in &excluded {
            changed |= preferences.exclude(&topic.value);
        }
        if changed {
            self.state.flags.updated_preferences = true;
        }
        Ok(())
    }

    fn remove_preference(&mut self, act: &DialogueAct, _ctx: Dispatch<'_>) -> Result<(), DialogueError> {
        let mut topics: Vec<&AnnotationValue> =
            act.annotations_for(slots::EXCLUDE_TOPIC).map(|a| &a.value).collect();
        if topics.is_empty() {
            topics = act.annotations_for(slots::TOPIC).map(|a| &a.value).collect();
        }
        if topics.is_empty() {
            tracing::warn!(intent = %act.intent, "Missing topic annotation, ignoring");
            return Ok(());
        }

        for topic in topics {
            let toggle = self.state.preferences.toggle(topic);
            tracing::debug!(?toggle, "Preference toggled");
        }
        self.state.flags.updated_preferences = true;
        Ok(())
    }

    fn reset_preferences(&mut self, _act: &DialogueAct, _ctx: Dispatch<'_>) -> Result<(), DialogueError> {
        if self.state.flags.awaiting_confirmation() {
            tracing::debug!("Preference reset deferred until confirmed");
            return Ok(());
        }

        self.state.preferences.clear();
        self.state.flags.updated_preferences = true;
        self.state.topic_suggestions.clear();
        self.state.suggested_topics.clear();
        Ok(())
    }

    fn get_keyphrase_explanation(
        &mut self,
        act: &DialogueAct,
        _ctx: Dispatch<'_>,
    ) -> Result<(), DialogueError> {
        self.state.discussion_topics = act.annotations_for(slots::TOPIC).cloned().collect();
        Ok(())
    }

    fn select_option(&mut self, act: &DialogueAct, ctx: Dispatch<'_>) -> Result<(), DialogueError> {
        if ctx.is_synthesized() {
            tracing::warn!("Option selection inside a replayed option, ignoring");
            return Ok(());
        }
        let Some(id) = act.value(slots::ID).and_then(AnnotationValue::as_index) else {
            tracing::warn!(intent = %act.intent, "Missing option id, ignoring");
            return Ok(());
        };
        let Some(option) = self.state.options.get(id).cloned() else {
            tracing::warn!(
                option_id = id,
                open = self.state.options.len(),
                "Selected option is not open"
            );
            self.state.flags.unresolved_option = true;
            return Ok(());
        };
        self.replay_option(option, ctx)
    }

    fn confirm(&mut self, _act: &DialogueAct, ctx: Dispatch<'_>) -> Result<(), DialogueError> {
        if ctx.is_synthesized() {
            tracing::warn!("Confirmation inside a replayed option, ignoring");
            return Ok(());
        }
        match self.state.options.iter().find(|o| o.is_confirm_option()).cloned() {
            Some(option) => self.replay_option(option, ctx),
            None => {
                tracing::debug!("Nothing to confirm");
                Ok(())
            }
        }
    }

    /// Handle `option` as if the user had typed it
    fn replay_option(&mut self, option: DialogueAct, ctx: Dispatch<'_>) -> Result<(), DialogueError> {
        if option.is_confirm_option() {
            self.state.flags.confirmation_received = true;
        }
        let synthesized = vec![
            Action::Utterance(Utterance::user(option_text(&option))),
            Action::Act(option),
        ];
        self.state.user_actions.extend(synthesized.iter().cloned());
        self.handle_actions(
            &synthesized,
            Dispatch {
                bus: ctx.bus,
                depth: ctx.depth + 1,
            },
        )
    }

    fn add_bookmark(&mut self, act: &DialogueAct, _ctx: Dispatch<'_>) -> Result<(), DialogueError> {
        let Some(item_id) = item_id(act) else {
            tracing::warn!(intent = %act.intent, "Missing item id, ignoring");
            return Ok(());
        };
        let Some(item) = self.state.recommendation.current().get(&item_id).cloned() else {
            tracing::warn!(%item_id, "Bookmarked item is not recommended");
            return Ok(());
        };
        if !self.state.bookmarks.iter().any(|b| b.item_id == item_id) {
            self.state.bookmarks.push(item);
        }
        Ok(())
    }

    fn remove_bookmark(&mut self, act: &DialogueAct, _ctx: Dispatch<'_>) -> Result<(), DialogueError> {
        let Some(item_id) = item_id(act) else {
            tracing::warn!(intent = %act.intent, "Missing item id, ignoring");
            return Ok(());
        };
        self.state.bookmarks.retain(|b| b.item_id != item_id);
        Ok(())
    }

    fn get_recommendation_explanation(
        &mut self,
        act: &DialogueAct,
        _ctx: Dispatch<'_>,
    ) -> Result<(), DialogueError> {
        let item = item_id(act).and_then(|id| self.state.recommendation.current().get(&id).cloned());
        if item.is_none() {
            tracing::warn!(intent = %act.intent, "Explained item is not recommended");
        }
        self.state.item_in_focus = item;
        self.state.flags.agent_should_respond = true;
        self.reset_options();
        Ok(())
    }

    fn set_style(&mut self, act: &DialogueAct, ctx: Dispatch<'_>) -> Result<(), DialogueError> {
        let Some(tag) = act.text(slots::STYLE) else {
            tracing::warn!(intent = %act.intent, "Missing style annotation, ignoring");
            return Ok(());
        };
        let style: Style = tag.parse()?;

        self.state.style = style;
        self.state.flags.style_changed = true;
        self.state.flags.confirmation_required = style.requires_confirmation();
        tracing::info!(%style, "Style changed");
        ctx.bus.dispatch(&StyleChanged { style })?;
        Ok(())
    }

    // ========================================================================
    // System intent handlers
    // ========================================================================

    fn provide_options(&mut self, act: &DialogueAct, _ctx: Dispatch<'_>) -> Result<(), DialogueError> {
        self.state.options.extend(act.options().cloned());
        Ok(())
    }

    fn provide_recommendations(
        &mut self,
        _act: &DialogueAct,
        _ctx: Dispatch<'_>,
    ) -> Result<(), DialogueError> {
        self.state.flags.new_recommendations = false;
        Ok(())
    }

    fn explain_keyphrase(&mut self, act: &DialogueAct, _ctx: Dispatch<'_>) -> Result<(), DialogueError> {
        self.state
            .explained_topics
            .extend(act.annotations_for(slots::TOPIC).cloned());
        Ok(())
    }

    fn suggest_topics(&mut self, act: &DialogueAct, _ctx: Dispatch<'_>) -> Result<(), DialogueError> {
        self.state
            .suggested_topics
            .extend(act.annotations_for(slots::TOPIC).cloned());
        self.state.topic_suggestions.clear();
        Ok(())
    }
}

/// Item id from an `item_id` slot, accepting numeric ids
fn item_id(act: &DialogueAct) -> Option<String> {
    match act.value(slots::ITEM_ID)? {
        AnnotationValue::Text(id) => Some(id.clone()),
        AnnotationValue::Integer(id) => Some(id.to_string()),
        AnnotationValue::Item(item) => Some(item.item_id.clone()),
        _ => None,
    }
}
