// Learning Drop generation core: prompt construction and response parsing.
// The model call itself lives in llm_client — nothing in here touches the
// network, which keeps both sides of the pipeline unit-testable.

pub mod builder;
pub mod parser;
pub mod prompts;
