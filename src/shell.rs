//! Interactive terminal front-end
//!
//! Walks the user through the three phases in order: the setup form, the
//! chat loop, and the self-rating feedback form. All session logic lives in
//! the runtime; the shell only reads lines and renders [`UiEvent`]s.

use crate::feedback::{FeedbackForm, FeedbackRatings, Rating};
use crate::llm::LlmService;
use crate::profile::{Company, ExperienceLevel, Position, Profile, ProfileForm};
use crate::runtime::{SessionRuntime, UiEvent};
use crate::state_machine::{Event, Phase};
use std::io::Write as _;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::broadcast;

pub struct Shell<L: LlmService> {
    runtime: SessionRuntime<L>,
    lines: Lines<BufReader<Stdin>>,
}

impl<L: LlmService> Shell<L> {
    pub fn new(runtime: SessionRuntime<L>) -> Self {
        Self {
            runtime,
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    pub async fn run(mut self) -> std::io::Result<()> {
        let mut rx = self.runtime.subscribe();

        println!("=== Interview Practice ===");
        println!("Fill in your profile, then chat with the interviewer.\n");

        let Some(profile) = self.collect_profile().await? else {
            return Ok(());
        };

        self.dispatch(Event::StartChat { profile }, &mut rx).await;
        println!("\nThe interviewer is ready. Ask your first question.");

        while self.runtime.state().phase == Phase::Chatting {
            let remaining = self
                .runtime
                .state()
                .turns_remaining(self.runtime.context().max_turns);
            let Some(line) = self.prompt(&format!("\nYou ({remaining} turns left)> ")).await? else {
                println!();
                return Ok(());
            };

            self.dispatch(Event::UserPrompt { text: line }, &mut rx).await;
        }

        if self.runtime.state().phase == Phase::Feedback {
            println!("\nYou have reached the maximum number of questions for this session.");
            println!("Before you go, rate your own performance.\n");
            if let Some(ratings) = self.collect_feedback().await? {
                self.dispatch(Event::SubmitFeedback { ratings }, &mut rx).await;
            }
        }

        println!("\nGood luck with the real thing!");
        Ok(())
    }

    /// Feed one event to the runtime while rendering UI events as they
    /// arrive, so streamed chunks appear live.
    async fn dispatch(&mut self, event: Event, rx: &mut broadcast::Receiver<UiEvent>) {
        let result = {
            let turn = self.runtime.handle_event(event);
            tokio::pin!(turn);
            loop {
                tokio::select! {
                    result = &mut turn => break result,
                    received = rx.recv() => {
                        if let Ok(ui_event) = received {
                            render(&ui_event);
                        }
                    }
                }
            }
        };

        // Events published right before the turn settled.
        while let Ok(ui_event) = rx.try_recv() {
            render(&ui_event);
        }

        if let Err(e) = result {
            println!("! {e}");
        }
    }

    // ------------------------------------------------------------
    // Setup form
    // ------------------------------------------------------------

    async fn collect_profile(&mut self) -> std::io::Result<Option<Profile>> {
        let mut form = ProfileForm::new();

        let Some(name) = self.prompt("Name: ").await? else {
            return Ok(None);
        };
        form.set_name(&name);

        let Some(level) = self
            .select("Experience level", &ExperienceLevel::ALL, ExperienceLevel::label)
            .await?
        else {
            return Ok(None);
        };
        form.set_level(level);

        let Some(position) = self
            .select("Position", &Position::ALL, Position::label)
            .await?
        else {
            return Ok(None);
        };
        form.set_position(position);

        let Some(company) = self
            .select("Company", &Company::ALL, Company::label)
            .await?
        else {
            return Ok(None);
        };
        form.set_company(company);

        let Some(experience) = self.prompt("Briefly describe your experience: ").await? else {
            return Ok(None);
        };
        form.set_experience(&experience);

        let Some(skills) = self.prompt("Key skills: ").await? else {
            return Ok(None);
        };
        form.set_skills(&skills);

        Ok(Some(form.freeze()))
    }

    /// Numbered single-choice menu; empty input picks the first option,
    /// which is the default for every selection in the form.
    async fn select<T: Copy>(
        &mut self,
        title: &str,
        options: &[T],
        label: fn(T) -> &'static str,
    ) -> std::io::Result<Option<T>> {
        println!("{title}:");
        for (i, option) in options.iter().enumerate() {
            let marker = if i == 0 { " (default)" } else { "" };
            println!("  {}. {}{marker}", i + 1, label(*option));
        }

        loop {
            let Some(line) = self.prompt("> ").await? else {
                return Ok(None);
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return Ok(Some(options[0]));
            }
            match trimmed.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(options[n - 1])),
                _ => println!("Enter a number between 1 and {}.", options.len()),
            }
        }
    }

    // ------------------------------------------------------------
    // Feedback form
    // ------------------------------------------------------------

    async fn collect_feedback(&mut self) -> std::io::Result<Option<FeedbackRatings>> {
        let mut form = FeedbackForm::new();

        let Some(rating) = self.read_rating("Technical Skills").await? else {
            return Ok(None);
        };
        form.technical = rating;

        let Some(rating) = self.read_rating("Communication").await? else {
            return Ok(None);
        };
        form.communication = rating;

        let Some(rating) = self.read_rating("Problem Solving").await? else {
            return Ok(None);
        };
        form.problem_solving = rating;

        let Some(rating) = self.read_rating("Culture Fit").await? else {
            return Ok(None);
        };
        form.culture_fit = rating;

        let Some(rating) = self.read_rating("Confidence").await? else {
            return Ok(None);
        };
        form.confidence = rating;

        Ok(Some(form.freeze()))
    }

    async fn read_rating(&mut self, name: &str) -> std::io::Result<Option<Rating>> {
        loop {
            let Some(line) = self
                .prompt(&format!("{name} (1-5, Enter for 3): "))
                .await?
            else {
                return Ok(None);
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return Ok(Some(Rating::default()));
            }
            match trimmed.parse::<u8>().ok().and_then(Rating::new) {
                Some(rating) => return Ok(Some(rating)),
                None => println!("Enter a number between 1 and 5."),
            }
        }
    }

    // ------------------------------------------------------------
    // Line input
    // ------------------------------------------------------------

    /// Print a prompt and read one line; `None` means stdin closed.
    async fn prompt(&mut self, text: &str) -> std::io::Result<Option<String>> {
        print!("{text}");
        std::io::stdout().flush()?;
        self.lines.next_line().await
    }
}

fn render(event: &UiEvent) {
    match event {
        UiEvent::AssistantChunk { text } => {
            print!("{text}");
            let _ = std::io::stdout().flush();
        }
        UiEvent::AssistantDone => println!(),
        UiEvent::Notice { message } => println!("! {message}"),
        UiEvent::PhaseChanged { .. } => {}
        UiEvent::FeedbackRecorded { summary } => println!("\n{summary}"),
    }
}
