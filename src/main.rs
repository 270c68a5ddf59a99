use std::{future::Future, sync::Arc};

use dotenv::dotenv;
use gk_buddy::{
    config::BotConfig,
    quiz::{reset_session, ChatTurn, QuizEngine, SessionState},
};
use log::{debug, info};
use teloxide::{
    dispatching::dialogue::{ErasedStorage, InMemStorage, Storage},
    prelude::*,
    types::{KeyboardButton, KeyboardMarkup},
    utils::command::BotCommands,
};

type ChatDialogue = Dialogue<SessionState, ErasedStorage<SessionState>>;
type HandlerError = Box<dyn std::error::Error + Send + Sync>;
type HandlerResult = Result<(), HandlerError>;
type SessionStorage = std::sync::Arc<ErasedStorage<SessionState>>;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Chat commands:")]
enum BotCommand {
    #[command(description = "forget this chat and start over.")]
    Clear,
}

#[tokio::main]
async fn main() -> Result<(), HandlerError> {
    dotenv().ok();
    pretty_env_logger::init();

    let config = BotConfig::from_env()?;
    let bank = config.load_bank()?;
    info!("Loaded {} quiz questions", bank.len());
    let engine = Arc::new(QuizEngine::new(bank));

    // Quiz progress only; the chat itself is the transcript.
    let storage: SessionStorage = InMemStorage::<SessionState>::new().erase();

    info!("Starting GK buddy bot...");
    let bot = Bot::from_env();

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<SessionState>, SessionState>()
            .branch(
                dptree::entry()
                    .filter_command::<BotCommand>()
                    .endpoint(clear),
            )
            .branch(dptree::endpoint(converse)),
    )
    .dependencies(dptree::deps![storage, engine])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;

    Ok(())
}

fn keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new("start quiz"),
        KeyboardButton::new("help"),
        KeyboardButton::new("stop"),
    ]])
}

async fn converse(
    engine: Arc<QuizEngine>,
    bot: Bot,
    dialogue: ChatDialogue,
    state: SessionState,
    msg: Message,
) -> HandlerResult {
    // Stickers, photos and the like arrive without text and count as an empty message.
    let user_message = msg.text().unwrap_or_default();
    let turn = engine.reply_to(user_message, Some(state));
    debug!(
        "chat {}: {:?} -> {:?}, {} replies",
        msg.chat.id.0,
        state,
        turn.state,
        turn.replies.len()
    );

    let chat_id = msg.chat.id;
    deliver(
        turn,
        |next| dialogue.update(next),
        |text| {
            let request = bot.send_message(chat_id, text).reply_markup(keyboard());
            async move { request.await.map(|_| ()).map_err(HandlerError::from) }
        },
    )
    .await
}

/// Stores the next state, then sends the replies in order. Stops at the first failure.
async fn deliver<E, Save, SaveFut, Reply, ReplyFut>(
    turn: ChatTurn,
    save: Save,
    mut send: Reply,
) -> Result<(), E>
where
    Save: FnOnce(SessionState) -> SaveFut,
    SaveFut: Future<Output = Result<(), E>>,
    Reply: FnMut(String) -> ReplyFut,
    ReplyFut: Future<Output = Result<(), E>>,
{
    save(turn.state).await?;
    for reply in turn.replies {
        send(reply).await?;
    }
    Ok(())
}

async fn clear(bot: Bot, dialogue: ChatDialogue, msg: Message) -> HandlerResult {
    // The cleared transcript and input buffer have no Telegram counterpart.
    dialogue.update(reset_session().state).await?;
    debug!("chat {}: session cleared", msg.chat.id.0);

    bot.send_message(msg.chat.id, "Chat cleared. Type 'start quiz' whenever you're ready.")
        .reply_markup(keyboard())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn answered_first_question() -> ChatTurn {
        let first_question = SessionState::Quiz {
            question_index: 0,
            score: 0,
        };
        QuizEngine::default().reply_to("pacific", Some(first_question))
    }

    #[tokio::test]
    async fn state_is_saved_before_any_reply_is_sent() {
        let log = RefCell::new(Vec::new());
        let result: Result<(), String> = deliver(
            answered_first_question(),
            |state| {
                log.borrow_mut().push(format!("save {:?}", state));
                async { Ok(()) }
            },
            |text| {
                log.borrow_mut().push(format!("send {}", text));
                async { Ok(()) }
            },
        )
        .await;

        assert!(result.is_ok());
        let log = log.into_inner();
        assert_eq!(log.len(), 3);
        assert_eq!(log[0], "save Quiz { question_index: 1, score: 1 }");
        assert!(log[1].starts_with("send 🎉 Correct!"));
        assert!(log[2].starts_with("send Next question (2/5):"));
    }

    #[tokio::test]
    async fn failed_send_keeps_the_advanced_state() {
        let saved = RefCell::new(None);
        let sent = RefCell::new(0);
        let result: Result<(), String> = deliver(
            answered_first_question(),
            |state| {
                *saved.borrow_mut() = Some(state);
                async { Ok(()) }
            },
            |_text| {
                *sent.borrow_mut() += 1;
                let attempt = *sent.borrow();
                async move {
                    if attempt == 2 {
                        Err("telegram is down".to_string())
                    } else {
                        Ok(())
                    }
                }
            },
        )
        .await;

        assert_eq!(result, Err("telegram is down".to_string()));
        assert_eq!(
            saved.into_inner(),
            Some(SessionState::Quiz {
                question_index: 1,
                score: 1
            })
        );
    }

    #[tokio::test]
    async fn failed_save_sends_nothing() {
        let sent = RefCell::new(0);
        let result: Result<(), String> = deliver(
            answered_first_question(),
            |_state| async { Err("storage unavailable".to_string()) },
            |_text| {
                *sent.borrow_mut() += 1;
                async { Ok(()) }
            },
        )
        .await;

        assert!(result.is_err());
        assert_eq!(sent.into_inner(), 0);
    }
}
