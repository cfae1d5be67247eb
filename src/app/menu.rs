use crate::domain::ports::Console;
use crate::utils::error::Result;

pub const MENU_WIDTH: usize = 50;

/// `text` centred in `width` columns, padded with `fill`.
pub fn center(text: &str, width: usize, fill: char) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let pad = width - len;
    let left = pad / 2;
    format!(
        "{}{}{}",
        fill.to_string().repeat(left),
        text,
        fill.to_string().repeat(pad - left)
    )
}

/// Framed heading, e.g. `/*======*\ | RULES | \*======*/`.
pub fn title(text: &str) -> Vec<String> {
    let upper = text.to_uppercase();
    let bar = "=".repeat(upper.chars().count() + 2);
    vec![
        format!("/*{}*\\", bar),
        format!("|  {}  |", upper),
        format!("\\*{}*/", bar),
    ]
}

/// 50-column `=` header followed by boxed `key. label` rows.
pub fn boxed(header: &str, items: &[(&str, &str)], status: Option<&str>) -> Vec<String> {
    let rule = "-".repeat(MENU_WIDTH);
    let mut lines = vec![center(&format!(" {} ", header), MENU_WIDTH, '=')];
    if let Some(status) = status {
        lines.push(status.to_string());
    }
    for (key, label) in items {
        lines.push(rule.clone());
        let cell = format!("| {}.  {}", key, label);
        lines.push(format!("{:<width$}|", cell, width = MENU_WIDTH - 1));
    }
    lines.push(rule);
    lines
}

/// `1 -- START (Start A New Game)` rows.
pub fn numbered(items: &[(&str, &str)]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(idx, (name, label))| {
            format!(
                "{} -- {} ({})",
                idx + 1,
                name.to_uppercase(),
                crate::core::hangman::title_case(label)
            )
        })
        .collect()
}

pub fn say_all<I, T>(console: &mut dyn Console, lines: I)
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    for line in lines {
        console.say(line.as_ref());
    }
}

/// Re-prompts until `parse` accepts the answer, printing its complaint each time.
pub async fn prompt_until<T, F>(console: &mut dyn Console, prompt: &str, mut parse: F) -> Result<T>
where
    F: FnMut(&str) -> std::result::Result<T, String> + Send,
{
    loop {
        let answer = console.read_line(prompt).await?;
        match parse(&answer) {
            Ok(value) => return Ok(value),
            Err(complaint) => console.say(&complaint),
        }
    }
}

/// Re-prompts until the answer is one of `keys` (case-insensitive); returns it uppercased.
pub async fn choose_key(console: &mut dyn Console, prompt: &str, keys: &[&str]) -> Result<String> {
    prompt_until(console, prompt, |answer| {
        let key = answer.trim().to_uppercase();
        if keys.iter().any(|k| k.eq_ignore_ascii_case(&key)) {
            Ok(key)
        } else {
            Err("You entered an invalid option. Try again.".to_string())
        }
    })
    .await
}

/// Re-prompts until a number in `1..=count` is entered; returns the zero-based index.
pub async fn choose_number(console: &mut dyn Console, count: usize) -> Result<usize> {
    prompt_until(console, "Enter a number for the desired option: ", |answer| {
        match answer.trim().parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => Ok(n - 1),
            _ => Err(format!(
                "The selected option ({}) is invalid. Try again.",
                answer.trim()
            )),
        }
    })
    .await
}

/// `(y/n)` question. Gives up with `None` after `attempts` unusable answers.
pub async fn ask_yes_no(console: &mut dyn Console, prompt: &str, attempts: u32) -> Result<Option<bool>> {
    for _ in 0..attempts {
        match console.read_line(prompt).await?.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(Some(true)),
            "n" | "no" => return Ok(Some(false)),
            _ => console.say("Invalid entry! Please enter `y` or `n`."),
        }
    }
    Ok(None)
}
