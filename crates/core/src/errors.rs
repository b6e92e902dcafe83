/// Maps an internal error description to text that is safe to show a user.
pub fn safe_error_message(detail: &str) -> &'static str {
    let lower = detail.to_lowercase();

    if contains_any(&lower, &["jwt", "token"]) {
        "Your session has expired. Please sign in again."
    } else if contains_any(&lower, &["row-level security", "permission denied"]) {
        "You do not have permission to perform this action."
    } else if contains_any(&lower, &["violates", "constraint"]) {
        "The provided data is invalid. Please check your input."
    } else if contains_any(&lower, &["network", "fetch", "connection"]) {
        "Unable to connect. Please check your internet connection."
    } else if contains_any(&lower, &["rate limit", "too many requests"]) {
        "Too many requests. Please wait a moment and try again."
    } else if contains_any(&lower, &["not found", "does not exist"]) {
        "The requested resource could not be found."
    } else if contains_any(&lower, &["authentication", "unauthorized"]) {
        "Please sign in to continue."
    } else {
        "An error occurred. Please try again later."
    }
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}
