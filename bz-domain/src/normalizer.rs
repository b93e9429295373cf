use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // all minecraft formatting codes (https://minecraft.wiki/w/Formatting_codes), e.g. '§3Blue Goblin Egg'
    static ref FORMATTING_CODES: Regex = Regex::new("§[0-9a-v]").expect("formatting code regex is valid");
    // placeholders from the items api, e.g. '%%red%%Volcanic Rock'
    static ref PLACEHOLDER: Regex = Regex::new("%%[A-Za-z0-9_]+%%").expect("placeholder regex is valid");
}

/// Strips formatting codes and placeholders from a display name and trims the result.
pub fn normalize(raw: &str) -> String {
    let mut current = raw.to_string();

    // removing one pattern can splice together another one, e.g. '§%%red%%a'
    loop {
        let without_codes = FORMATTING_CODES.replace_all(&current, "");
        let stripped = PLACEHOLDER.replace_all(&without_codes, "").into_owned();

        if stripped == current {
            break;
        }
        current = stripped;
    }

    current.trim().to_string()
}
