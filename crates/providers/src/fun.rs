//! Jokes and trivia

use async_trait::async_trait;
use jarvis::{CapabilityError, CapabilityResult, Entertainment, FunKind};
use rand::seq::SliceRandom;

pub const JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs.",
    "I told my computer I needed a break, and it said no problem, it would go to sleep.",
    "Why did the smart bulb go to school? It wanted to be a little brighter.",
    "There are 10 kinds of people in the world: those who understand binary and those who don't.",
    "Why was the cell phone wearing glasses? It lost its contacts.",
    "I would tell you a UDP joke, but you might not get it.",
];

pub const FACTS: &[&str] = &[
    "Honey never spoils. Archaeologists have found edible honey in ancient Egyptian tombs.",
    "Octopuses have three hearts and blue blood.",
    "A day on Venus is longer than a year on Venus.",
    "Bananas are berries, but strawberries are not.",
    "The Eiffel Tower can be about 15 centimeters taller in summer because the metal expands.",
    "The first computer bug was an actual moth found in a relay in 1947.",
];

#[derive(Debug, Default, Clone, Copy)]
pub struct Trivia;

#[async_trait]
impl Entertainment for Trivia {
    async fn fun(&self, kind: FunKind) -> CapabilityResult<String> {
        let pool = match kind {
            FunKind::Joke => JOKES,
            FunKind::Fact => FACTS,
        };
        pool.choose(&mut rand::thread_rng())
            .map(|s| s.to_string())
            .ok_or_else(|| CapabilityError::failed("Nothing to tell"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_picks_from_the_right_pool() {
        let joke = Trivia.fun(FunKind::Joke).await.unwrap();
        assert!(JOKES.contains(&joke.as_str()));

        let fact = Trivia.fun(FunKind::Fact).await.unwrap();
        assert!(FACTS.contains(&fact.as_str()));
    }
}
