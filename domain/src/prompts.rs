use crate::language::Language;
use crate::models::ResponseSet;

pub fn translation_prompt(question: &str) -> String {
    format!("Translate this question into natural English: {}", question)
}

/// Instruction asking for a three-part summary of the collected answers.
/// The markers ①②③ are what the summary parser later splits on.
pub fn summary_prompt(language: Language, question: &str, responses: &ResponseSet) -> String {
    let answers = responses.joined();
    match language {
        Language::Japanese => format!(
            "以下はAIが「{}」という質問に対して出力した回答群です。\n\
             これらからAIがこの概念をどう捉えているかを、\n\
             ①共通点　②相違点　③全体の傾向\n\
             の3点で要約してください。\n\
             【回答群】\n{}",
            question, answers
        ),
        Language::English => format!(
            "Below are AI responses to the question: \"{}\".\n\
             Summarize how AI perceives this concept in three parts:\n\
             ① Common traits, ② Differences, ③ Overall tendencies.\n\
             [Responses]\n{}",
            question, answers
        ),
    }
}
