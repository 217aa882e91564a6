use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::message::generate_commit_message;

#[derive(Debug, Clone)]
pub struct MessageCommandArgs {
    pub max_tokens: Option<u32>,
}

pub async fn run(ctx: &AppContext, args: MessageCommandArgs) -> AppResult<String> {
    let max_tokens = args.max_tokens.unwrap_or(ctx.config.max_tokens);
    generate_commit_message(ctx, max_tokens).await
}
