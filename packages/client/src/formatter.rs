//! Message formatting utilities for client display.

use miharu_server::infrastructure::dto::websocket::{
    AnswerResultMessage, DistractedStudentMessage, LeaderboardEntryDto, NewQuestionMessage,
    StudentFocusDto,
};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the classroom-connected message showing the current roster
    ///
    /// # Arguments
    ///
    /// * `students` - Current classroom snapshot entries
    /// * `current_student_id` - The current student's ID (to mark as "me")
    ///
    /// # Returns
    ///
    /// A formatted string with the roster listing
    pub fn format_classroom_connected(
        students: &[StudentFocusDto],
        current_student_id: &str,
    ) -> String {
        let mut output = String::new();
        output.push_str("\n\n============================================================\n");
        output.push_str("Classroom:\n");

        if students.is_empty() {
            output.push_str("(No students)\n");
        } else {
            for student in students {
                let is_me = student.student_id == current_student_id;
                let me_suffix = if is_me { " (me)" } else { "" };
                output.push_str(&format!(
                    "{}{} - focus {}%\n",
                    student.name, me_suffix, student.score
                ));
            }
        }

        output.push_str("============================================================\n");
        output
    }

    /// Format a classroom focus snapshot as a single summary line
    ///
    /// Snapshots arrive on every report from any student, so the rendering
    /// stays compact.
    pub fn format_snapshot(students: &[StudentFocusDto], current_student_id: &str) -> String {
        if students.is_empty() {
            return "\n* Class focus: (no students)\n".to_string();
        }

        let entries: Vec<String> = students
            .iter()
            .map(|student| {
                let is_me = student.student_id == current_student_id;
                let me_suffix = if is_me { " (me)" } else { "" };
                let tab_suffix = if student.is_tab_active {
                    ""
                } else {
                    " [tab hidden]"
                };
                format!(
                    "{}{} {}%{}",
                    student.name, me_suffix, student.score, tab_suffix
                )
            })
            .collect();

        format!("\n* Class focus: {}\n", entries.join(", "))
    }

    /// Format a distraction alert
    pub fn format_distraction_alert(
        alert: &DistractedStudentMessage,
        current_student_id: &str,
    ) -> String {
        let is_me = alert.student_id == current_student_id;
        let me_suffix = if is_me { " (you)" } else { "" };
        format!(
            "\n! {}{} is distracted: score {} ({})\n",
            alert.student_name, me_suffix, alert.score, alert.cause
        )
    }

    /// Format a quiz question prompt
    pub fn format_question(question: &NewQuestionMessage) -> String {
        let mut output = String::new();
        output.push_str("\n\n------------------------------------------------------------\n");
        output.push_str(&format!(
            "Pop quiz ({} seconds): {}\n",
            question.timer_duration, question.question_text
        ));

        if let Some(options) = &question.options {
            for (i, option) in options.iter().enumerate() {
                let letter = (b'A' + (i as u8 % 26)) as char;
                output.push_str(&format!("  {}. {}\n", letter, option));
            }
        }

        output.push_str("Answer with: answer <text>\n");
        output.push_str("------------------------------------------------------------\n");
        output
    }

    /// Format an answer result notification
    pub fn format_answer_result(result: &AnswerResultMessage) -> String {
        let verdict = if result.correct { "Correct" } else { "Wrong" };
        format!(
            "\n{}: {} (+{} pts, total {})\n",
            verdict, result.message, result.points, result.total_score
        )
    }

    /// Format a leaderboard listing
    pub fn format_leaderboard(entries: &[LeaderboardEntryDto], current_student_id: &str) -> String {
        let mut output = String::new();
        output.push_str("\nLeaderboard:\n");

        if entries.is_empty() {
            output.push_str("(No scores yet)\n");
        } else {
            for (i, entry) in entries.iter().enumerate() {
                let is_me = entry.id == current_student_id;
                let me_suffix = if is_me { " (you)" } else { "" };
                output.push_str(&format!(
                    "{}. {}{} - {} pts\n",
                    i + 1,
                    entry.name,
                    me_suffix,
                    entry.score
                ));
            }
        }

        output
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
