use rdkafka::error::KafkaError;
use rdkafka::types::RDKafkaErrorCode;
use stream_check::probes::is_benign_poll_error;

#[test]
fn missing_topic_events_are_skipped() {
    let err = KafkaError::MessageConsumption(RDKafkaErrorCode::UnknownTopicOrPartition);
    assert!(is_benign_poll_error(&err));
}

#[test]
fn transport_class_errors_stay_fatal() {
    let codes = [
        RDKafkaErrorCode::AllBrokersDown,
        RDKafkaErrorCode::BrokerTransportFailure,
        RDKafkaErrorCode::OperationTimedOut,
    ];
    for code in codes {
        assert!(!is_benign_poll_error(&KafkaError::MessageConsumption(code)));
    }
}

#[test]
fn non_consumption_errors_stay_fatal() {
    let err = KafkaError::Subscription("local: invalid topic filter".to_string());
    assert!(!is_benign_poll_error(&err));
}
