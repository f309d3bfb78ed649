use std::time::Duration;

use fltk::app::{self, Sender};

use crate::app::domain::messages::Message;

/// Deliver `msg` through the channel after `delay`. A zero delay lands on the
/// next turn of the event loop.
pub fn send_after(sender: Sender<Message>, delay: Duration, msg: Message) {
    app::add_timeout3(delay.as_secs_f64(), move |_| {
        sender.send(msg);
    });
}
