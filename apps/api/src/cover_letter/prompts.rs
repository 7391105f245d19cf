// Cover letter prompt pieces. The candidate section is assembled at runtime
// from whichever fields are present.

pub const COVER_LETTER_INTRO: &str =
    "Write a professional cover letter for the candidate described below.";

pub const COVER_LETTER_GUIDELINES: &str = r#"Guidelines:
- 3-4 short paragraphs, under 350 words
- Open with the position and company when they are given
- Connect the candidate's most recent role and top skills to the job
- Use only the facts provided; do not invent employers, dates or numbers
- Close with a brief call to action and a sign-off using the candidate's name
- Return only the letter text"#;

/// Job postings longer than this are truncated before prompting.
pub const MAX_JOB_POSTING_CHARS: usize = 4000;
