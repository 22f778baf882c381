//! Message dispatcher - Routes inbound messages to command handlers

use std::sync::Arc;
use crate::domain::entities::{ActivityKind, Command, Message};
use crate::domain::traits::{ActivitySource, Bot};
use crate::application::services::{ActivityFormatter, Delivery, ReplyService};
use crate::infrastructure::config::Config;
use super::filter::{CommandPrefixFilter, Discard, FilterChain, OwnMessageFilter};
use super::parser::CommandParser;

/// Terminal state of one inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Discarded(Discard),
    Sent(String),
    SendFailed,
}

impl From<Delivery> for DispatchOutcome {
    fn from(delivery: Delivery) -> Self {
        match delivery {
            Delivery::Sent(id) => DispatchOutcome::Sent(id),
            Delivery::Failed => DispatchOutcome::SendFailed,
        }
    }
}

/// Message dispatcher - filter, parse, run, reply
///
/// Holds no per-message state, so one instance is shared by every
/// concurrent message task.
pub struct MessageDispatcher {
    filters: FilterChain,
    parser: CommandParser,
    formatter: ActivityFormatter,
    activities: Arc<dyn ActivitySource>,
    replies: ReplyService,
}

impl MessageDispatcher {
    pub fn new(config: &Config, activities: Arc<dyn ActivitySource>, bot: Arc<dyn Bot>) -> Self {
        let parser = CommandParser::from_config(&config.commands, config.activities.default_limit);
        let formatter = ActivityFormatter::new(&config.commands.prefix, parser.registry(), &config.messages);
        let filters = FilterChain::new()
            .add(OwnMessageFilter::new(&config.bot.id))
            .add(CommandPrefixFilter::new(&config.commands.prefix));

        Self {
            filters,
            parser,
            formatter,
            activities,
            replies: ReplyService::new(bot),
        }
    }

    pub fn parser(&self) -> &CommandParser {
        &self.parser
    }

    /// Handle one inbound message end to end
    pub async fn dispatch(&self, message: Message) -> DispatchOutcome {
        tracing::info!("New message from {}: {}", message.sender_display(), message.text);

        if let Err(reason) = self.filters.check(&message) {
            tracing::debug!("{} => ignoring", reason);
            return DispatchOutcome::Discarded(reason);
        }

        let Some(command) = self.parser.parse(&message.text) else {
            return DispatchOutcome::Discarded(Discard::NotACommand);
        };
        tracing::info!("Identified command: {:?}", command);

        let reply = self.execute(&command).await;
        self.replies.send_text(&message.room_id, &reply).await.into()
    }

    /// Produce the reply text for a command
    pub async fn execute(&self, command: &Command) -> String {
        if let Some((kind, limit)) = command.activity_request() {
            return self.activities_reply(kind, limit).await;
        }

        match command {
            Command::Unrecognized(keyword) => self.formatter.unrecognized(keyword),
            _ => self.formatter.help(),
        }
    }

    async fn activities_reply(&self, kind: ActivityKind, limit: u32) -> String {
        tracing::info!("Fetching {} activities, max: {}", kind, limit);

        match self.activities.fetch_activities(kind, limit).await {
            Ok(mut records) => {
                tracing::info!("Retrieved {} {} activities", records.len(), kind);
                records.truncate(limit as usize);
                self.formatter.format(kind, &records)
            }
            Err(e) => {
                tracing::warn!("Could not retrieve list of {} activities: {}", kind, e);
                self.formatter.failure(kind)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use crate::application::errors::{BotError, FetchError};
    use crate::domain::entities::ActivityRecord;
    use crate::domain::traits::BotInfo;

    /// Activity source that records requests and replays a canned answer
    struct FakeActivities {
        calls: Mutex<Vec<(ActivityKind, u32)>>,
        answer: fn() -> Result<Vec<ActivityRecord>, FetchError>,
    }

    impl FakeActivities {
        fn new(answer: fn() -> Result<Vec<ActivityRecord>, FetchError>) -> Arc<Self> {
            Arc::new(Self { calls: Mutex::new(Vec::new()), answer })
        }

        fn calls(&self) -> Vec<(ActivityKind, u32)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ActivitySource for FakeActivities {
        async fn fetch_activities(&self, kind: ActivityKind, limit: u32) -> Result<Vec<ActivityRecord>, FetchError> {
            self.calls.lock().unwrap().push((kind, limit));
            (self.answer)()
        }
    }

    #[derive(Default)]
    struct RecordingBot {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl RecordingBot {
        fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Bot for RecordingBot {
        async fn send_message(&self, room_id: &str, text: &str) -> Result<String, BotError> {
            self.sent.lock().unwrap().push((room_id.to_string(), text.to_string()));
            if self.fail {
                return Err(BotError::Send("boom".to_string()));
            }
            Ok(format!("sent-{}", self.sent.lock().unwrap().len()))
        }

        async fn send_image(&self, room_id: &str, url: &str) -> Result<String, BotError> {
            self.send_message(room_id, url).await
        }

        fn bot_info(&self) -> BotInfo {
            BotInfo { id: "bot-1".to_string(), name: "test".to_string() }
        }
    }

    fn three_records() -> Result<Vec<ActivityRecord>, FetchError> {
        Ok(vec![
            ActivityRecord::new("One", "Mon", "09:00", "Room A", "Ann"),
            ActivityRecord::new("Two", "Mon", "10:00", "Room B", "Bo"),
            ActivityRecord::new("Three", "Mon", "11:00", "Room C", "Cy"),
        ])
    }

    fn no_records() -> Result<Vec<ActivityRecord>, FetchError> {
        Ok(Vec::new())
    }

    fn server_error() -> Result<Vec<ActivityRecord>, FetchError> {
        Err(FetchError::HttpStatus(500))
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.bot.id = "bot-1".to_string();
        config
    }

    fn setup(
        answer: fn() -> Result<Vec<ActivityRecord>, FetchError>,
    ) -> (MessageDispatcher, Arc<FakeActivities>, Arc<RecordingBot>) {
        let activities = FakeActivities::new(answer);
        let bot = Arc::new(RecordingBot::default());
        let dispatcher = MessageDispatcher::new(&config(), activities.clone(), bot.clone());
        (dispatcher, activities, bot)
    }

    #[tokio::test]
    async fn test_own_messages_have_no_side_effects() {
        let (dispatcher, activities, bot) = setup(three_records);

        for text in ["/next", "/current 2", "/help", "/foo", "hello"] {
            let outcome = dispatcher.dispatch(Message::new("room", "bot-1", text)).await;
            assert_eq!(outcome, DispatchOutcome::Discarded(Discard::OwnMessage));
        }

        assert!(activities.calls().is_empty());
        assert!(bot.sent().is_empty());
    }

    #[tokio::test]
    async fn test_non_commands_have_no_side_effects() {
        let (dispatcher, activities, bot) = setup(three_records);

        for text in ["next", "what is on now?", " /next", ""] {
            let outcome = dispatcher.dispatch(Message::new("room", "user", text)).await;
            assert_eq!(outcome, DispatchOutcome::Discarded(Discard::NotACommand));
        }

        assert!(activities.calls().is_empty());
        assert!(bot.sent().is_empty());
    }

    #[tokio::test]
    async fn test_next_with_limit_fetches_next() {
        let (dispatcher, activities, bot) = setup(three_records);

        let outcome = dispatcher.dispatch(Message::new("room-7", "user", "/next 3")).await;

        assert_eq!(outcome, DispatchOutcome::Sent("sent-1".to_string()));
        assert_eq!(activities.calls(), vec![(ActivityKind::Next, 3)]);

        let sent = bot.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "room-7");
        assert!(sent[0].1.starts_with("Here are the 3 upcoming activities"));
    }

    #[tokio::test]
    async fn test_limit_below_one_fetches_one() {
        let (dispatcher, activities, _bot) = setup(no_records);

        dispatcher.dispatch(Message::new("room", "user", "/current 0")).await;
        dispatcher.dispatch(Message::new("room", "user", "/next -2")).await;

        assert_eq!(
            activities.calls(),
            vec![(ActivityKind::Current, 1), (ActivityKind::Next, 1)]
        );
    }

    #[tokio::test]
    async fn test_out_of_range_limits_are_clamped_not_defaulted() {
        let (dispatcher, activities, _bot) = setup(three_records);

        dispatcher.dispatch(Message::new("room", "user", "/current -99999999999999999999")).await;
        dispatcher.dispatch(Message::new("room", "user", "/next 99999999999999999999")).await;

        assert_eq!(
            activities.calls(),
            vec![(ActivityKind::Current, 1), (ActivityKind::Next, u32::MAX)]
        );
    }

    #[tokio::test]
    async fn test_missing_limit_uses_default() {
        let (dispatcher, activities, _bot) = setup(no_records);

        dispatcher.dispatch(Message::new("room", "user", "/current")).await;
        dispatcher.dispatch(Message::new("room", "user", "/next soon")).await;

        assert_eq!(
            activities.calls(),
            vec![(ActivityKind::Current, 5), (ActivityKind::Next, 5)]
        );
    }

    #[tokio::test]
    async fn test_listing_is_cut_to_limit() {
        let (dispatcher, _activities, bot) = setup(three_records);

        dispatcher.dispatch(Message::new("room", "user", "/current 2")).await;

        let text = &bot.sent()[0].1;
        assert!(text.starts_with("Here are the 2 current activities"));
        assert!(!text.contains("Three"));
    }

    #[tokio::test]
    async fn test_server_error_replies_with_failure() {
        let (dispatcher, _activities, bot) = setup(server_error);

        dispatcher.dispatch(Message::new("room", "user", "/next")).await;

        assert_eq!(
            bot.sent()[0].1,
            "Could not retrieve upcoming activities, sorry [Activities API not responding]"
        );
    }

    #[tokio::test]
    async fn test_empty_current_reply() {
        let (dispatcher, _activities, bot) = setup(no_records);

        dispatcher.dispatch(Message::new("room", "user", "/current")).await;
        dispatcher.dispatch(Message::new("room", "user", "/next")).await;

        let sent = bot.sent();
        assert!(sent[0].1.starts_with("No activity in the DevNet Zone currently"));
        assert!(sent[1].1.starts_with("No upcoming activity"));
    }

    #[tokio::test]
    async fn test_unrecognized_command_reply() {
        let (dispatcher, activities, bot) = setup(three_records);

        dispatcher.dispatch(Message::new("room", "user", "/foo")).await;

        let text = &bot.sent()[0].1;
        assert!(text.contains("/foo is not supported"));
        assert!(text.contains("/next"));
        assert!(text.contains("/current"));
        assert!(activities.calls().is_empty());
    }

    #[tokio::test]
    async fn test_help_does_not_fetch() {
        let (dispatcher, activities, bot) = setup(three_records);

        dispatcher.dispatch(Message::new("room", "user", "/HELP")).await;

        assert!(bot.sent()[0].1.starts_with("Welcome to the @CiscoDevNet Zone"));
        assert!(activities.calls().is_empty());
    }

    #[tokio::test]
    async fn test_send_failure_is_reported_not_raised() {
        let activities = FakeActivities::new(three_records);
        let bot = Arc::new(RecordingBot { fail: true, ..Default::default() });
        let dispatcher = MessageDispatcher::new(&config(), activities, bot.clone());

        let outcome = dispatcher.dispatch(Message::new("room", "user", "/next")).await;

        assert_eq!(outcome, DispatchOutcome::SendFailed);
        assert_eq!(bot.sent().len(), 1);
    }
}
