//! A public sum type used from another module, through the shorthand table.

mod protocol {
    use sum_macros::sum_type;

    #[sum_type]
    #[derive(Debug, Clone, PartialEq)]
    pub enum Message {
        Ping,
        Text(String),
        Move { x: i32, y: i32 },
    }
}

use protocol::*;
use sum_tag::{construct, construct_with, dispatch, Table};

fn render() -> impl Table<Message, Output = String> {
    Message::cases()
        .ping(|_| "ping".to_owned())
        .text(|text| text)
        .r#move(|(x, y)| format!("{x},{y}"))
}

fn main() {
    let table = render();
    assert_eq!(dispatch(construct(MessagePing), &table), "ping");
    assert_eq!(dispatch(construct_with(MessageMove, (1, 2)), &table), "1,2");

    let short = MessageCases::new()
        .text(|text: String| text.len())
        .otherwise(|| 0);
    assert_eq!(dispatch(construct_with(MessageText, "hey".into()), &short), 3);
}
