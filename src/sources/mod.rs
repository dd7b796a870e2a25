//! Transport envelopes for incoming batch records.
//!
//! A record arrives either from a direct queue or from a notification-topic
//! fan-out. The channel is a closed tagged union carried explicitly in the
//! record, never inferred from structural shape.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Originating channel for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Topic,
    Queue,
}

impl ChannelKind {
    /// Numeric discriminant used in diagnostic output.
    pub fn source_type(self) -> u8 {
        match self {
            ChannelKind::Topic => 0,
            ChannelKind::Queue => 1,
        }
    }
}

/// One raw batch record with its transport envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "channel", rename_all = "snake_case")]
pub enum Record {
    Queue(QueueRecord),
    Topic(TopicRecord),
}

/// Envelope for a record delivered through a direct queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueRecord {
    /// Base64-encoded binary event payload.
    pub body: String,
    /// Source queue identifier (ARN).
    pub event_source_arn: String,
}

/// Envelope for a record delivered through a notification topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicRecord {
    /// Base64-encoded binary event payload.
    pub message: String,
    /// Source topic identifier (ARN).
    pub topic_arn: String,
}

impl Record {
    pub fn channel_kind(&self) -> ChannelKind {
        match self {
            Record::Queue(_) => ChannelKind::Queue,
            Record::Topic(_) => ChannelKind::Topic,
        }
    }

    /// Identifier of the originating channel, used in diagnostics.
    pub fn source_name(&self) -> &str {
        match self {
            Record::Queue(record) => &record.event_source_arn,
            Record::Topic(record) => &record.topic_arn,
        }
    }

    /// Strips the transport envelope down to the raw binary payload.
    pub fn payload(&self) -> Result<Vec<u8>, base64::DecodeError> {
        match self {
            Record::Queue(record) => BASE64.decode(&record.body),
            Record::Topic(record) => BASE64.decode(&record.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_record_exposes_channel_and_source() {
        let record = Record::Queue(QueueRecord {
            body: BASE64.encode(b"payload"),
            event_source_arn: "arn:aws:sqs:us-west-2:123456789012:SQSQueue".to_string(),
        });

        assert_eq!(record.channel_kind(), ChannelKind::Queue);
        assert_eq!(record.channel_kind().source_type(), 1);
        assert_eq!(
            record.source_name(),
            "arn:aws:sqs:us-west-2:123456789012:SQSQueue"
        );
        assert_eq!(record.payload().expect("payload"), b"payload");
    }

    #[test]
    fn topic_record_exposes_channel_and_source() {
        let record = Record::Topic(TopicRecord {
            message: BASE64.encode(b"payload"),
            topic_arn: "arn:aws:sns:us-west-2:123456789012:ExampleTopic".to_string(),
        });

        assert_eq!(record.channel_kind(), ChannelKind::Topic);
        assert_eq!(record.channel_kind().source_type(), 0);
        assert_eq!(
            record.source_name(),
            "arn:aws:sns:us-west-2:123456789012:ExampleTopic"
        );
    }

    #[test]
    fn corrupt_payload_is_an_error() {
        let record = Record::Queue(QueueRecord {
            body: "not base64!".to_string(),
            event_source_arn: "arn:aws:sqs:us-west-2:123456789012:SQSQueue".to_string(),
        });

        assert!(record.payload().is_err());
    }

    #[test]
    fn records_parse_from_tagged_json() {
        let raw = "[{\"channel\":\"queue\",\"body\":\"AA==\",\
                   \"event_source_arn\":\"arn:aws:sqs:us-west-2:123456789012:SQSQueue\"},\
                   {\"channel\":\"topic\",\"message\":\"AA==\",\
                   \"topic_arn\":\"arn:aws:sns:us-west-2:123456789012:ExampleTopic\"}]";

        let records: Vec<Record> = serde_json::from_str(raw).expect("parse");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].channel_kind(), ChannelKind::Queue);
        assert_eq!(records[1].channel_kind(), ChannelKind::Topic);
    }
}
