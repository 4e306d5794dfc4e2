//! Maintains the CLI message log in response to runtime events.
use board_core::Flight;
use board_runtime::{BoardEvent, Event, NoticeEvent};
use tracing::warn;

use client_frontend_core::{
    MessageConfig,
    event::{EventConsumer, EventImpact},
    message::{MessageEntry, MessageLevel, MessageLog},
};

pub struct CliEventConsumer {
    log: MessageLog,
    config: MessageConfig,
}

impl CliEventConsumer {
    pub fn new(log: MessageLog, config: MessageConfig) -> Self {
        Self { log, config }
    }

    fn push(&mut self, text: impl Into<String>, level: MessageLevel) {
        self.log.push(MessageEntry::new(text, level));
    }

    fn push_landing(&mut self, flight: &Flight, animated: bool) {
        let destination = flight
            .destination
            .map_or_else(|| "off".to_string(), |container| container.to_string());
        let suffix = if animated { "" } else { " (skipped)" };
        self.push(
            format!(
                "{:?} {}: {} -> {}{}",
                flight.kind, flight.piece, flight.source, destination, suffix
            ),
            MessageLevel::Info,
        );
    }
}

impl EventConsumer for CliEventConsumer {
    fn on_event(&mut self, event: &Event) -> EventImpact {
        match event {
            Event::Board(BoardEvent::Reset { pieces, local, .. }) => {
                self.push(
                    format!("Board reset: {pieces} pieces, you play {local}."),
                    MessageLevel::Info,
                );
                EventImpact::redraw()
            }
            Event::Board(BoardEvent::FlightLanded {
                flight, animated, ..
            }) => {
                if self.config.show_moves {
                    self.push_landing(flight, *animated);
                }
                EventImpact::redraw()
            }
            Event::Board(BoardEvent::PlaybackFailed { error }) => {
                // Stays out of the player's log; the board is refreshed instead.
                warn!(%error, "action list rejected");
                EventImpact::redraw()
            }
            Event::Board(BoardEvent::PlaybackFinished {
                fast_forwarded: true,
                applied,
            }) => {
                self.push(
                    format!("Skipped ahead to newer move ({applied} applied)."),
                    MessageLevel::Warning,
                );
                EventImpact::redraw()
            }
            Event::Board(_) | Event::Controls(_) => EventImpact::redraw(),
            Event::Notice(NoticeEvent::Notice(notice)) => {
                self.push(notice.text.clone(), notice.tone.into());
                EventImpact::redraw()
            }
            Event::Notice(NoticeEvent::GameResult(result)) => {
                let level = if result.won {
                    MessageLevel::Positive
                } else {
                    MessageLevel::Negative
                };
                self.push(
                    format!(
                        "{} {}: You {} / {} Opponent",
                        result.message, result.heading, result.your_score, result.opponent_score
                    ),
                    level,
                );
                EventImpact::redraw()
            }
        }
    }

    fn message_log(&self) -> &MessageLog {
        &self.log
    }

    fn message_log_mut(&mut self) -> &mut MessageLog {
        &mut self.log
    }

    fn take_message_log(self) -> MessageLog {
        self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_core::{
        ActionKind, ContainerId, InvalidActionError, InvalidActionReason, Landing, Notice, PieceId,
        Point,
    };

    fn consumer(show_moves: bool) -> CliEventConsumer {
        CliEventConsumer::new(
            MessageLog::new(8),
            MessageConfig {
                show_moves,
                ..MessageConfig::default()
            },
        )
    }

    fn latest(consumer: &CliEventConsumer) -> Option<(String, MessageLevel)> {
        consumer
            .message_log()
            .recent(1)
            .next()
            .map(|entry| (entry.text.clone(), entry.level))
    }

    fn landed() -> Event {
        let source = ContainerId::Point(Point::new(0).unwrap());
        let destination = Some(ContainerId::Point(Point::new(3).unwrap()));
        Event::Board(BoardEvent::FlightLanded {
            flight: Flight {
                index: 0,
                piece: PieceId(7),
                kind: ActionKind::Move,
                source,
                destination,
            },
            landing: Landing {
                source,
                destination,
            },
            animated: true,
        })
    }

    #[test]
    fn notices_keep_their_tone() {
        let mut consumer = consumer(false);
        let impact = consumer.on_event(&Event::Notice(NoticeEvent::Notice(Notice::undo())));

        assert!(impact.requires_redraw);
        assert_eq!(
            latest(&consumer),
            Some(("Player undid last move.".to_string(), MessageLevel::Info))
        );
    }

    #[test]
    fn landings_are_logged_only_when_enabled() {
        let mut quiet = consumer(false);
        quiet.on_event(&landed());
        assert!(quiet.message_log().is_empty());

        let mut verbose = consumer(true);
        verbose.on_event(&landed());
        let (text, _) = latest(&verbose).unwrap();
        assert_eq!(text, "Move piece#7: point0 -> point3");
    }

    #[test]
    fn rejected_lists_stay_out_of_the_log() {
        let mut consumer = consumer(true);
        let impact = consumer.on_event(&Event::Board(BoardEvent::PlaybackFailed {
            error: InvalidActionError {
                index: 1,
                piece: PieceId(42),
                kind: ActionKind::Hit,
                reason: InvalidActionReason::UnknownPiece,
            },
        }));

        assert!(impact.requires_redraw);
        assert!(consumer.message_log().is_empty());
    }
}
