// Prompt templates for the copilot variants.
//
// Placeholders are filled in a single pass by `generation::template::fill`:
//   {resume} {name} {domain} {passion}   user profile fields (each used once)
//   {data_block_instruction} {language_instruction}
//   {html_output_instruction} {scoring_metrics}   shared fragments from llm_client::prompts
// Templates must not contain any other curly braces.

/// Short-form ideas table with a personal analysis. Collects the resume only.
pub const IDEAS_PROMPT_TEMPLATE: &str = r#"Task: Generate business ideas based on the user's background, location, and opportunities. Evaluate feasibility with a score out of 100, using metrics such as product-market fit, TAM, cost, fundraising needs, and more. Output an HTML table in the user's language. Include personal analysis and co-founder suggestions. Use visuals to show relevance, usefulness, uniqueness, virality, and willingness to buy. Use a light blue gradient and arrow indicators. Multiple rows for multiple ideas. Bold column title with light blue background. Make visuals aesthetically pleasing with good spacing. Refer to the user by their first name and use their resume to inform the evaluation. Evaluate each idea with its feasibility and include a brief explanation of the factors that contribute to the feasibility score.

{data_block_instruction}

{language_instruction}

{html_output_instruction}

Output HTML for the below:
Potential Business Ideas for [first name] (#017dfe header, white text)
1. [idea 1] (bold, black text)
{scoring_metrics}, each with a score and a short comment (normal font in bullet points)
The co-founder [first name] should find (bold) -
Where to find co-founders -
Repeat for ideas 2 and 3.

Personal Analysis (large header)
Table with Factors, Score, Comments columns (#017dfe header, white text)
Rows with Strengths, Weaknesses, Past Experiences, Storytelling (bold)

<<<RESUME
{resume}
RESUME>>>"#;

/// Long-form evaluation with gradient bar visuals. Collects the resume only and
/// is downloaded as a standalone HTML page by default.
pub const DETAILED_PROMPT_TEMPLATE: &str = r#"Task: Generate potential business ideas based on an individual's background and relevant industries, taking into account location factors and recent developments and opportunities. Evaluate the feasibility of each idea, considering factors such as product market fit, people mission fit, market potential, TAM, cost, fundraising needs, and any other relevant factors.
Output: An HTML table with each potential idea and a score out of 100 for its feasibility, along with an explanation of the score and the metrics used to evaluate it. Metrics: {scoring_metrics}.
For each metric, make it out of 100. You don't have to use whole numbers. Provide a reasoning for each of the metrics instead of only providing a number. Include information on what types of co-founders the user should be looking for and where they may find them.
{language_instruction}
Follow up under the ideas section with a personal analysis table with strengths and weaknesses, past experiences, storytelling, and any additional factors that may be relevant.
After that, with a 30px margin top: create visuals at the end of the table for the personal analysis. Use a gradient that starts from white and ends at #017dfe. Use an arrow with a label and a number indicator to point out where each lands. Make sure the number lands on the bar.
AT THE VERY END OF THE DOC with a 30px margin top: create visuals for relevance of the problem, usefulness of the solution, uniqueness, virality, and willingness to buy using a light blue theme. Use a gradient that starts from white and ends at #017dfe. Use an arrow with a label and a number indicator to point out where each lands. Make sure the number lands on the bar.
Refer to the user by their first name and use their resume to inform the evaluation.
Multiple rows should be provided for multiple potential ideas.
For each idea, evaluate its feasibility and include a brief explanation of the factors that contribute to the feasibility score.
The column title of the result table should be bold and have a light blue background (#017dfe).
Make sure the text that is on white background does not blend in with the background.
Make the visual aesthetically pleasing with good spacing.

{data_block_instruction}

{html_output_instruction}

<<<RESUME
{resume}
RESUME>>>"#;

/// Ideas anchored on a target domain and a passion statement.
pub const PASSION_PROMPT_TEMPLATE: &str = r#"Task: Generate three business ideas in the user's chosen domain that connect their background with what they are passionate about. Evaluate each idea with a feasibility score out of 100 and score it on these metrics, each out of 100 with a one-sentence reasoning: {scoring_metrics}. Include what kind of co-founder the user should look for and where to find them.

{data_block_instruction}

{language_instruction}

{html_output_instruction}

Output HTML for the below:
Potential Business Ideas for the user, addressed by the first name given in the NAME block (#017dfe header, white text)
For each idea: the idea title (bold, black text), a table of the metrics with Metric, Score, Reasoning columns (bold column titles with a light blue #017dfe background, white text), and a horizontal bar per metric filled with a gradient from white to #017dfe with an arrow and the number on the bar.
Finish with a Personal Analysis table (Strengths, Weaknesses, Past Experiences, Storytelling, Passion Fit) with Factors, Score, Comments columns.
Make the visuals aesthetically pleasing with good spacing.

<<<NAME
{name}
NAME>>>

<<<DOMAIN
{domain}
DOMAIN>>>

<<<PASSION
{passion}
PASSION>>>

<<<RESUME
{resume}
RESUME>>>"#;
