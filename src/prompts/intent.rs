const INTRO: &str = "You turn a user's request about their todo list into a single JSON command.";
const INTENTS_HEADER: &str = "Supported intents and their fields:";
const INTENTS: &[&str] = &[
    "create: {\"intent\": \"create\", \"task\": \"text of the new todo\"}",
    "read: {\"intent\": \"read\"}",
    "update: {\"intent\": \"update\", \"id\"?: number, \"position\"?: number, \"task\"?: \"fragment of the existing todo\", \"newTask\"?: \"replacement text\", \"done\"?: boolean}",
    "delete: {\"intent\": \"delete\", \"id\"?: number, \"position\"?: number, \"task\"?: \"fragment of the existing todo\"}",
];
const TARGET_HEADER: &str = "To pick the todo for update or delete, give exactly one of:";
const TARGETS: &[&str] = &[
    "id: when the user names a todo by its number (\"task 2\", \"todo #5\").",
    "position: when the user refers to order. 1 is the first todo, -1 is the last, -2 the one before it.",
    "task: a short fragment of the todo's text when the user describes it in words.",
];
const EXAMPLES_HEADER: &str = "Examples:";
const EXAMPLES: &[(&str, &str)] = &[
    ("add buy milk", r#"{"intent": "create", "task": "buy milk"}"#),
    ("what's on my list?", r#"{"intent": "read"}"#),
    ("mark task 2 as done", r#"{"intent": "update", "id": 2, "done": true}"#),
    ("delete the last task", r#"{"intent": "delete", "position": -1}"#),
    ("complete the first one", r#"{"intent": "update", "position": 1, "done": true}"#),
    ("I finished the book", r#"{"intent": "update", "task": "book", "done": true}"#),
    (
        "rename the milk todo to buy oat milk",
        r#"{"intent": "update", "task": "milk", "newTask": "buy oat milk"}"#,
    ),
    ("remove the dentist reminder", r#"{"intent": "delete", "task": "dentist"}"#),
];
const RULES_HEADER: &str = "Rules:";
const RULES: &[&str] = &[
    "Output JSON only. No markdown, no extra text.",
    "Use numbers for id and position, booleans for done.",
    "Omit fields you do not need.",
];

fn bullets(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the instruction prompt that wraps the user's free text.
pub fn build_intent_prompt(user_text: &str) -> String {
    let examples = EXAMPLES
        .iter()
        .map(|(said, json)| format!("User: {}\nJSON: {}", said, json))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "{intro}\n\n{intents_header}\n{intents}\n\n{target_header}\n{targets}\n\n{examples_header}\n{examples}\n\n{rules_header}\n{rules}\n\nUser: {user_text}\nJSON:",
        intro = INTRO,
        intents_header = INTENTS_HEADER,
        intents = bullets(INTENTS),
        target_header = TARGET_HEADER,
        targets = bullets(TARGETS),
        examples_header = EXAMPLES_HEADER,
        examples = examples,
        rules_header = RULES_HEADER,
        rules = bullets(RULES),
        user_text = user_text.trim(),
    )
}
