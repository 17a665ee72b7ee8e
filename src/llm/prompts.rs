/// Build the per-section prompt for earnings report summaries.
pub fn build_section_prompt(section_text: &str) -> String {
    format!(
        "As a financial analyst, your task is to summarize the following section from an earnings report.\n\
Focus *only* on the information present in this specific section.\n\
\n\
Please identify and extract:\n\
1.  Key financial figures or quantitative performance indicators mentioned.\n\
2.  Key qualitative points, achievements, product updates, or strategic initiatives discussed.\n\
3.  Any challenges, risks, or headwinds highlighted.\n\
4.  If this section discusses future outlook, guidance, or forward-looking statements, please note that.\n\
\n\
Provide a concise and clear summary of this section.\n\
---\n\
Section Text:\n\
{section_text}\n\
---\n\
Summary:"
    )
}
