//! UI utilities for the client.

use std::io::Write;

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt(student_id: &str) {
    print!("{}> ", student_id);
    std::io::stdout().flush().ok();
}
