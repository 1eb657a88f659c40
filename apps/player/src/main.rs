//! Terminal front-end for the WordTrek session engine.
//!
//! A development harness standing in for the mobile UI: it renders the
//! current exercise, turns typed input into answer payloads, and dispatches
//! the same commands a real front-end would.

use anyhow::Result;
use lesson_core::{AnswerPayload, Exercise, ExerciseKind};
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wordtrek_player::{
    hydrate, JsonFileStore, LessonSource, MemoryStore, SessionEngine, SnapshotStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Composition-time backend selection: durable when a data dir exists,
    // otherwise an in-memory session.
    let backend: Arc<dyn SnapshotStore> = match JsonFileStore::default_path() {
        Some(path) => Arc::new(JsonFileStore::new(path)),
        None => {
            tracing::warn!("no data directory available, progress will not be saved");
            Arc::new(MemoryStore::new())
        }
    };

    let mut engine = SessionEngine::new(backend, LessonSource::Embedded);
    let report = hydrate(&mut engine).await;

    if let Some(error) = report.error {
        anyhow::bail!("could not load lesson: {error}");
    }

    let lesson = engine.state().lesson().expect("lesson loaded");
    println!("=== {} ===", lesson.title);
    println!("{} (~{} min)\n", lesson.description, lesson.estimated_time);

    if report.resumed_mid_lesson {
        println!("Resuming where you left off. Type 'restart' to start over.\n");
    } else {
        engine.start_lesson();
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let state = engine.state();

        if state.is_complete() {
            let lesson = state.lesson().expect("lesson loaded");
            println!("\n{}", lesson.completion_message);
            println!(
                "XP: {}  Streak: {}  Accuracy: {:.0}%",
                state.xp(),
                state.streak(),
                state.accuracy()
            );
            if let Some(next) = &lesson.next_lesson {
                println!("Up next: {}: {}", next.title, next.description);
            }
            break;
        }

        let Some(exercise) = state.current_exercise() else {
            engine.complete();
            continue;
        };
        let exercise = exercise.clone();

        let progress = state.progress();
        println!(
            "\n[{}/{}]  Hearts: {}  Streak: {}  XP: {}",
            progress.current,
            progress.total,
            state.hearts(),
            state.streak(),
            state.xp()
        );
        render_exercise(&exercise);
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let input = line?;
        let input = input.trim();

        match input {
            "quit" => break,
            "restart" => {
                engine.reset_lesson_completely();
                engine.start_lesson();
                continue;
            }
            _ => {}
        }

        let Some(payload) = parse_answer(&exercise, input) else {
            println!("Could not read that answer, try again.");
            continue;
        };

        match engine.submit_answer(&exercise.id, payload) {
            Some(true) => {
                println!("Correct!");
                engine.next();
            }
            Some(false) => {
                println!("Not quite. {}", exercise.explanation);
                engine.decrement_heart();
                if engine.state().is_game_over() {
                    println!("\nOut of hearts! Starting the lesson over.");
                    engine.start_lesson();
                } else {
                    engine.next();
                }
            }
            None => println!("That exercise is not part of this lesson."),
        }
    }

    // Flush queued saves before exiting.
    engine.shutdown().await;
    Ok(())
}

fn render_exercise(exercise: &Exercise) {
    println!("{}", exercise.question);
    match &exercise.kind {
        ExerciseKind::Mcq { options, .. } => {
            for (i, option) in options.iter().enumerate() {
                println!("  {}. {}", i + 1, option);
            }
            println!("(answer with a number)");
        }
        ExerciseKind::TypeAnswer { .. } => println!("(type your answer)"),
        ExerciseKind::WordBank { words, .. } => {
            println!("  Words: {}", words.join(", "));
            println!("(answer with one word)");
        }
        ExerciseKind::MatchPairs { pairs } => {
            let lefts: Vec<&str> = pairs.iter().map(|p| p.left.as_str()).collect();
            let rights: Vec<&str> = pairs.iter().map(|p| p.right.as_str()).collect();
            println!("  Left:  {}", lefts.join(", "));
            println!("  Right: {}", rights.join(", "));
            println!("(answer like: left=right, left=right)");
        }
        ExerciseKind::Listening { audio_url, .. } => {
            println!("  [audio: {audio_url}]");
            println!("(type what you hear)");
        }
    }
}

fn parse_answer(exercise: &Exercise, input: &str) -> Option<AnswerPayload> {
    match &exercise.kind {
        ExerciseKind::Mcq { .. } => {
            let number: usize = input.parse().ok()?;
            Some(AnswerPayload::Mcq {
                selected_index: number.checked_sub(1)?,
            })
        }
        ExerciseKind::TypeAnswer { .. } => Some(AnswerPayload::TypeAnswer {
            text: input.to_string(),
        }),
        ExerciseKind::WordBank { .. } => Some(AnswerPayload::WordBank {
            selected_word: input.to_string(),
        }),
        ExerciseKind::MatchPairs { .. } => {
            let mut matches = HashMap::new();
            for entry in input.split(',') {
                let (left, right) = entry.split_once('=')?;
                matches.insert(left.trim().to_string(), right.trim().to_string());
            }
            Some(AnswerPayload::MatchPairs { matches })
        }
        ExerciseKind::Listening { .. } => Some(AnswerPayload::Listening {
            text: input.to_string(),
        }),
    }
}
