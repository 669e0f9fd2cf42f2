use anyhow::anyhow;
use serde::Serialize;
use std::sync::Arc;

use super::{Intent, ParsedIntent, parse_intent};
use crate::error::{AppError, AppResult};
use crate::generator::Generator;
use crate::prompts::intent::build_intent_prompt;
use crate::service::TodoService;
use crate::todo::{Todo, TodoPatch};

/// What a resolved prompt did, serialized as `{"intent": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "intent", content = "data", rename_all = "lowercase")]
pub enum Outcome {
    Create(Todo),
    Read(Vec<Todo>),
    Update(Vec<Todo>),
    Delete(Vec<Todo>),
}

impl Outcome {
    pub fn intent(&self) -> Intent {
        match self {
            Self::Create(_) => Intent::Create,
            Self::Read(_) => Intent::Read,
            Self::Update(_) => Intent::Update,
            Self::Delete(_) => Intent::Delete,
        }
    }
}

/// Turns free text into exactly one CRUD call.
#[derive(Clone)]
pub struct IntentResolver {
    generator: Arc<dyn Generator>,
    todos: TodoService,
}

impl IntentResolver {
    pub fn new(generator: Arc<dyn Generator>, todos: TodoService) -> Self {
        Self { generator, todos }
    }

    pub fn model(&self) -> &str {
        self.generator.model()
    }

    /// Ask the model what `prompt` means, then carry it out.
    pub async fn resolve(&self, prompt: &str) -> AppResult<Outcome> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(AppError::validation("prompt is required"));
        }

        let raw = self
            .generator
            .generate(&build_intent_prompt(prompt))
            .await
            .map_err(AppError::Upstream)?;
        if raw.trim().is_empty() {
            return Err(AppError::Upstream(anyhow!("model returned an empty response")));
        }
        tracing::debug!(model = self.model(), %raw, "model response");

        let parsed = parse_intent(&raw)?;
        tracing::info!(intent = ?parsed.intent, "resolved prompt");
        self.dispatch(parsed).await
    }

    /// Run an already-parsed intent against the store.
    pub async fn dispatch(&self, parsed: ParsedIntent) -> AppResult<Outcome> {
        match parsed.intent {
            Intent::Create => {
                let task = parsed
                    .task
                    .as_deref()
                    .ok_or_else(|| AppError::validation("create needs task text"))?;
                Ok(Outcome::Create(self.todos.create(task).await?))
            }
            Intent::Read => Ok(Outcome::Read(self.todos.list().await?)),
            Intent::Update => {
                let id = self.resolve_target(&parsed).await?;
                let patch = TodoPatch {
                    task: parsed.new_task,
                    done: parsed.done,
                };
                Ok(Outcome::Update(self.todos.update(id, patch).await?))
            }
            Intent::Delete => {
                let id = self.resolve_target(&parsed).await?;
                Ok(Outcome::Delete(self.todos.delete(id).await?))
            }
        }
    }

    /// Pick the target id: explicit id, then position, then text fragment.
    /// Position and fragment lookups read the current list fresh.
    pub async fn resolve_target(&self, parsed: &ParsedIntent) -> AppResult<i64> {
        if let Some(id) = parsed.id {
            return Ok(id);
        }

        if let Some(position) = parsed.position {
            let todos = self.todos.list().await?;
            return index_for_position(position, todos.len())
                .map(|i| todos[i].id)
                .ok_or_else(|| {
                    AppError::not_found(format!(
                        "no todo at position {position} (list has {})",
                        todos.len()
                    ))
                });
        }

        if let Some(fragment) = parsed.task.as_deref() {
            let todos = self.todos.list().await?;
            return find_by_fragment(&todos, fragment)
                .map(|t| t.id)
                .ok_or_else(|| AppError::not_found(format!("no todo matching \"{fragment}\"")));
        }

        Err(AppError::validation("need id, position, or task text"))
    }
}

/// Zero-based index for a 1-based position; zero and negatives count from
/// the end (`-1` is the last item).
pub fn index_for_position(position: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let index = if position > 0 {
        position - 1
    } else {
        len + position
    };
    if (0..len).contains(&index) {
        usize::try_from(index).ok()
    } else {
        None
    }
}

/// First todo whose text contains `fragment`, ignoring case.
pub fn find_by_fragment<'a>(todos: &'a [Todo], fragment: &str) -> Option<&'a Todo> {
    let needle = fragment.to_lowercase();
    todos
        .iter()
        .find(|t| t.task.to_lowercase().contains(&needle))
}
