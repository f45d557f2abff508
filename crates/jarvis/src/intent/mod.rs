//! Intent rules and the ordered matcher
//!
//! Matching is plain substring/prefix logic over the normalized command.
//! Overlaps between rules are settled only by their position in the list:
//! the first rule whose trigger holds wins.

pub mod rules;

use crate::{
    capabilities::{FunKind, MediaOp, MetricKind, PowerOp},
    command::NormalizedCommand,
    extract::{strip_literal, VerbPattern},
};

/// Trigger predicate evaluated against a normalized command
#[derive(Debug, Clone)]
pub enum Trigger {
    /// Command contains any of the phrases
    Contains(Vec<String>),
    /// Command contains every phrase
    AllOf(Vec<String>),
    /// Command starts with any of the prefixes
    Prefix(Vec<String>),
    /// Command equals the phrase
    Exact(String),
    /// A leading verb followed by an argument
    Pattern(VerbPattern),
    /// Any of the nested triggers
    Either(Vec<Trigger>),
}

impl Trigger {
    pub fn contains<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Contains(phrases.into_iter().map(Into::into).collect())
    }

    pub fn all_of<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AllOf(phrases.into_iter().map(Into::into).collect())
    }

    pub fn prefix<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Prefix(prefixes.into_iter().map(Into::into).collect())
    }

    pub fn exact(phrase: impl Into<String>) -> Self {
        Self::Exact(phrase.into())
    }

    pub fn matches(&self, command: &NormalizedCommand) -> bool {
        match self {
            Trigger::Contains(phrases) => phrases.iter().any(|p| command.contains(p)),
            Trigger::AllOf(phrases) => {
                !phrases.is_empty() && phrases.iter().all(|p| command.contains(p))
            }
            Trigger::Prefix(prefixes) => prefixes.iter().any(|p| command.starts_with(p)),
            Trigger::Exact(phrase) => !phrase.is_empty() && command.as_str() == phrase,
            Trigger::Pattern(pattern) => pattern.is_match(command.as_str()),
            Trigger::Either(triggers) => triggers.iter().any(|t| t.matches(command)),
        }
    }
}

/// How a rule recovers its argument from the original text
#[derive(Debug, Clone)]
pub enum Extraction {
    StripLiteral(String),
    Prefix(VerbPattern),
}

/// Parameter requirement attached to a rule
#[derive(Debug, Clone)]
pub struct ParameterRule {
    pub extraction: Extraction,
    /// Spoken instead of calling the capability when the argument is missing
    pub clarification: String,
}

impl ParameterRule {
    pub fn strip_literal(literal: impl Into<String>, clarification: impl Into<String>) -> Self {
        Self {
            extraction: Extraction::StripLiteral(literal.into()),
            clarification: clarification.into(),
        }
    }

    pub fn prefix(pattern: VerbPattern, clarification: impl Into<String>) -> Self {
        Self {
            extraction: Extraction::Prefix(pattern),
            clarification: clarification.into(),
        }
    }

    /// Extract from the original text; `None` means the parameter is missing
    pub fn extract(&self, original: &str) -> Option<String> {
        let value = match &self.extraction {
            Extraction::StripLiteral(literal) => strip_literal(original, literal),
            Extraction::Prefix(pattern) => pattern.capture(original)?.to_string(),
        };
        (!value.is_empty()).then_some(value)
    }
}

/// What to do once a rule is selected
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Fixed reply, no capability involved
    Reply(String),
    Briefing,
    Media(MediaOp),
    StartMode,
    Power(PowerOp),
    Ping,
    SpeedTest,
    AddTask,
    ListTasks,
    ClearTasks,
    Lights,
    Weather,
    /// Open a fixed page and reply with `reply`
    OpenPage { url: String, reply: String },
    /// Open the URL captured from the command
    OpenWebsite,
    LaunchApp,
    Metric(MetricKind),
    Fun(FunKind),
}

/// Handling of a failed capability call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Show the provider's own error text
    Surface,
    /// Replace the error with a fixed apology
    Apologize(String),
}

/// One entry of the ordered rule table
#[derive(Debug, Clone)]
pub struct IntentRule {
    pub name: &'static str,
    pub trigger: Trigger,
    pub parameter: Option<ParameterRule>,
    pub action: Action,
    pub speak: bool,
    pub on_failure: FailurePolicy,
}

impl IntentRule {
    /// Spoken rule that surfaces provider errors
    pub fn new(name: &'static str, trigger: Trigger, action: Action) -> Self {
        Self {
            name,
            trigger,
            parameter: None,
            action,
            speak: true,
            on_failure: FailurePolicy::Surface,
        }
    }

    pub fn silent(mut self) -> Self {
        self.speak = false;
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterRule) -> Self {
        self.parameter = Some(parameter);
        self
    }

    pub fn apologize(mut self, apology: impl Into<String>) -> Self {
        self.on_failure = FailurePolicy::Apologize(apology.into());
        self
    }

    pub fn matches(&self, command: &NormalizedCommand) -> bool {
        self.trigger.matches(command)
    }
}

/// Linear first-match scan over an ordered rule list
#[derive(Debug, Clone)]
pub struct IntentMatcher {
    rules: Vec<IntentRule>,
}

impl IntentMatcher {
    pub fn new(rules: Vec<IntentRule>) -> Self {
        Self { rules }
    }

    pub fn find(&self, command: &NormalizedCommand) -> Option<&IntentRule> {
        if command.is_empty() {
            return None;
        }
        self.rules.iter().find(|rule| rule.matches(command))
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// Position of a rule in precedence order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(text: &str) -> NormalizedCommand {
        NormalizedCommand::new(text)
    }

    #[test]
    fn test_contains_is_not_word_aware() {
        let trigger = Trigger::contains(["light"]);
        assert!(trigger.matches(&command("Turn on the LIGHTS")));
        assert!(trigger.matches(&command("highlight this")));
    }

    #[test]
    fn test_all_of_requires_every_phrase() {
        let trigger = Trigger::all_of(["play", "pause"]);
        assert!(trigger.matches(&command("play pause")));
        assert!(trigger.matches(&command("pause and then play")));
        assert!(!trigger.matches(&command("play something")));
        assert!(!Trigger::all_of(Vec::<String>::new()).matches(&command("x")));
    }

    #[test]
    fn test_exact_and_either() {
        let trigger = Trigger::Either(vec![
            Trigger::contains(["open youtube music"]),
            Trigger::exact("play music"),
        ]);
        assert!(trigger.matches(&command("Play Music")));
        assert!(trigger.matches(&command("please open youtube music")));
        assert!(!trigger.matches(&command("play music loudly")));
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let specific = IntentRule::new(
            "toggle",
            Trigger::all_of(["play", "pause"]),
            Action::Media(MediaOp::PlayPause),
        );
        let general = IntentRule::new("play", Trigger::contains(["play"]), Action::Reply("play".into()));

        let matcher = IntentMatcher::new(vec![specific.clone(), general.clone()]);
        assert_eq!(matcher.find(&command("play pause")).unwrap().name, "toggle");
        assert_eq!(matcher.find(&command("play jazz")).unwrap().name, "play");

        // Reversing the list reverses the outcome: order is the contract
        let reversed = IntentMatcher::new(vec![general, specific]);
        assert_eq!(reversed.find(&command("play pause")).unwrap().name, "play");
    }

    #[test]
    fn test_empty_command_matches_nothing() {
        let matcher = IntentMatcher::new(vec![IntentRule::new(
            "anything",
            Trigger::exact(""),
            Action::Reply(String::new()),
        )]);
        assert!(matcher.find(&command("   ")).is_none());
    }

    #[test]
    fn test_parameter_rule_missing_value() {
        let rule = ParameterRule::strip_literal("ping", "Please specify a host to ping.");
        assert_eq!(rule.extract("ping 1.1.1.1"), Some("1.1.1.1".to_string()));
        assert_eq!(rule.extract("ping"), None);
    }
}
