//! Prompt templates for the daily run

use crate::core::language::Language;
use crate::news::catalog::NewsAssignment;
use crate::prompt::message::Prompt;
use crate::quiz::question::{OPTION_COUNT, Question};
use crate::quiz::slot::QuestionSlot;
use serde::Serialize;

const NEWS_EXAMPLE: &str = r#"[
    {"id": 1, "category": "sport", "region": "USA", "text": "The Los Angeles Lakers have won the NBA Championship, defeating the Boston Celtics in a thrilling seven-game series."},
    {"id": 2, "category": "science", "region": "Europe", "text": "A team of European scientists has developed a new drug that significantly slows the progression of Alzheimer's disease."}
]"#;

const QUESTION_EXAMPLE: &str = r#"[
    {
        "question_id": 1,
        "grammar_topic": "Prepositions",
        "question": "Alice travelled ___ 9:20 train, which arrived at 9:55.",
        "options": ["in the", "by a", "by the", "on the"],
        "correct_option_id": 3,
        "explanation": "On is used for travelling by a specific scheduled service such as a train or bus."
    },
    {
        "question_id": 4,
        "grammar_topic": "Phrasal verbs",
        "question": "Turn down is ...",
        "options": ["to take care of someone or something", "to stop trying to do something", "to reject or refuse something, such as an offer", "to meet someone unexpectedly"],
        "correct_option_id": 2,
        "explanation": "Example: I had to turn down the job offer because it wasn't the right fit for me."
    }
]"#;

/// Maximum poll question length requested from the quiz generator.
pub const REQUESTED_QUESTION_CHARS: usize = 260;

/// Question as shown to a verifier: the claimed answer is withheld.
#[derive(Serialize)]
struct VerificationItem<'a> {
    question_id: i64,
    question: &'a str,
    options: &'a [String],
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for news generation
    pub fn news_system() -> &'static str {
        "You are a news generator."
    }

    /// Request for one story per assignment, dated `date`.
    pub fn news(date: &str, assignments: &[NewsAssignment]) -> Prompt {
        let user = format!(
            r#"Please generate {count} diverse news stories with IDs, categories, regions and texts
as of {date} in the following JSON array without any additional text:

[
    {{"id": 1, "category": "sport", "region": "world", "text": "something ..."}},
    ...
]

Here is an example to illustrate the format:
{example}

Constraints:
News should be related to the following categories and regions:
{assignments}

The text of each story should be a narrative and easily perceived story of 1, 2 or at most 3 sentences.
Ensure that each entry follows this structure with relevant information as of {date}."#,
            count = assignments.len(),
            date = date,
            example = NEWS_EXAMPLE,
            assignments = to_json(assignments),
        );
        Prompt::system_user(Self::news_system(), user)
    }

    /// System prompt for quiz generation in `language`
    pub fn quiz_system(language: &Language) -> String {
        format!(
            "You are a language learning quiz generator in {lang}. \
             Your task is to create multiple-choice questions focused on {lang} grammar and vocabulary.",
            lang = language.display_name()
        )
    }

    /// Request for one question per slot.
    pub fn quiz(language: &Language, slots: &[QuestionSlot]) -> Prompt {
        let (vocabulary, grammar): (Vec<&QuestionSlot>, Vec<&QuestionSlot>) =
            slots.iter().partition(|s| s.is_vocabulary());

        let mut user = format!(
            r#"Please generate a list of {count} questions with multiple-choice options and indicate
the correct option for each question.
Each item of the list should be an object with the keys `question_id`, `grammar_topic`,
`question`, `options`, `correct_option_id` and `explanation`.
`options` holds exactly {options} distinct possible answers and `correct_option_id` is the
index of the correct answer in `options` (0-indexed). There must be only one correct answer.

Please output the result as a JSON array without any additional text.
Here is an example to illustrate the format:
{example}

The first {grammar_count} questions should be grammar questions related to the following
grammar topics and news:
{grammar}
"#,
            count = slots.len(),
            options = OPTION_COUNT,
            example = QUESTION_EXAMPLE,
            grammar_count = grammar.len(),
            grammar = to_json(&grammar),
        );

        if !vocabulary.is_empty() {
            user.push_str(&format!(
                r#"
The last question should be about the definition of the given word.
Its explanation should be just an example sentence using the word and the following news:
{}
"#,
                to_json(&vocabulary)
            ));
        }

        user.push_str(&format!(
            r#"
Ensure the options are varied and the correct option is accurately identified.
The questions and answers should be in {}.
Poll question length must not exceed {}."#,
            language.display_name(),
            REQUESTED_QUESTION_CHARS
        ));

        Prompt::system_user(Self::quiz_system(language), user)
    }

    /// System prompt for verification
    pub fn verification_system() -> &'static str {
        "You are a careful language teacher checking multiple-choice quiz questions. \
         Decide on your own which options are correct."
    }

    /// Request for independent answers. The generator's claim is never included.
    pub fn verification(language: &Language, questions: &[Question]) -> Prompt {
        let items: Vec<VerificationItem<'_>> = questions
            .iter()
            .map(|q| VerificationItem {
                question_id: q.question_id,
                question: &q.question_text,
                options: &q.options,
            })
            .collect();

        let user = format!(
            r#"Here are {count} multiple-choice questions in {lang}:
{items}

For every question, list the option text(s) that are correct.
Please output the result as a JSON array without any additional text, in this format:
[{{"question_id": 1, "correct_options": ["..."]}}]

Copy option texts exactly as written."#,
            count = questions.len(),
            lang = language.display_name(),
            items = to_json(&items),
        );
        Prompt::system_user(Self::verification_system(), user)
    }

    /// Picture prompt for an illustration of `question`.
    pub fn picture(question: &Question) -> String {
        format!(
            "Draw a bright, friendly illustration without any text or letters \
             for the following language quiz question:\n{}",
            to_json(question)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::entities::NewsItem;
    use crate::quiz::slot::plan_slots;

    fn question() -> Question {
        Question::new(
            7,
            "Prepositions",
            "She arrived ___ Monday.",
            vec!["on".into(), "in".into(), "at".into(), "by".into()],
            0,
            "Days take on.",
        )
    }

    #[test]
    fn test_news_prompt_mentions_date_and_assignments() {
        let assignments = vec![NewsAssignment {
            news_id: 1,
            category: "Science".into(),
            region: "Asia".into(),
        }];
        let prompt = PromptTemplate::news("2024-05-01", &assignments);

        assert_eq!(prompt.messages().len(), 2);
        let user = prompt.user_content();
        assert!(user.contains("2024-05-01"));
        assert!(user.contains("Science"));
        assert!(user.contains("generate 1 diverse"));
    }

    #[test]
    fn test_quiz_prompt_lists_slots() {
        let news = vec![NewsItem::new(1, "Sport", "Europe", "A team won.")];
        let topics = vec!["Passive".to_string()];
        let slots = plan_slots(&topics, "turn down", &news, 2).unwrap();
        let prompt = PromptTemplate::quiz(&Language::english(), &slots);

        let user = prompt.user_content();
        assert!(user.contains("Passive"));
        assert!(user.contains("turn down"));
        assert!(user.contains("must not exceed 260"));
        assert!(prompt.messages()[0].content.contains("English"));
    }

    #[test]
    fn test_verification_prompt_withholds_claim() {
        let prompt = PromptTemplate::verification(&Language::english(), &[question()]);
        let user = prompt.user_content();

        assert!(user.contains("She arrived ___ Monday."));
        assert!(user.contains("\"in\""));
        assert!(!user.contains("correct_option_id"));
        assert!(!user.contains("Days take on."));
    }

    #[test]
    fn test_picture_prompt_embeds_question() {
        let text = PromptTemplate::picture(&question());
        assert!(text.contains("She arrived ___ Monday."));
    }
}
