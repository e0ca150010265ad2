//! Full operator flow through the gRPC surface: deploy, inspect, stop

use sm_engine::adapters::grpc::ServiceManagerService;
use sm_engine::proto::service_manager_server::ServiceManager;
use sm_engine::proto::{
    DeployRequest, HasServiceRunningRequest, InfoRequest, StopRequest,
};
use sm_tests::Fixture;
use tonic::Request;

#[tokio::test]
async fn test_operator_flow() {
    let fx = Fixture::new();
    let svc = ServiceManagerService::new(fx.registry.clone());
    let instance_dir = fx.instance_dir("zookeeper");

    // Deploy with a non-default port.
    let deployed = svc
        .deploy(Request::new(DeployRequest {
            service: "zookeeper".to_string(),
            exec_dir: fx.exec_root.path().display().to_string(),
            client_port: 2281,
            max_client_cnxns: 5,
            tick_time: 1000,
            verbose: true,
        }))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(
        deployed.message,
        format!("Deployed zookeeper at {}", instance_dir.display())
    );

    // The daemon process was started against the rendered config.
    let specs = fx.launcher.spawned_specs();
    assert_eq!(specs.len(), 1);
    assert_eq!(
        specs[0].binary,
        fx.home.path().join("bin/zookeeper-server-start.sh")
    );
    let config = std::fs::read_to_string(&specs[0].config_path).unwrap();
    assert!(config.contains("clientPort=2281"));
    assert!(config.contains("maxClientCnxns=5"));
    assert!(config.contains("tickTime=1000"));

    // Status reflects the running instance.
    let running = svc
        .has_service_running(Request::new(HasServiceRunningRequest {
            service: "zookeeper".to_string(),
        }))
        .await
        .unwrap()
        .into_inner();
    assert!(running.running);

    let info = svc
        .info(Request::new(InfoRequest {
            service: "zookeeper".to_string(),
        }))
        .await
        .unwrap()
        .into_inner();
    assert!(info.message.contains("zookeeper instance"));
    assert!(info.message.contains("localhost:2281"));
    assert!(info
        .message
        .contains(&instance_dir.display().to_string()));

    // Stop deregisters and runs the stop command exactly once.
    let stopped = svc
        .stop(Request::new(StopRequest {
            service: "zookeeper".to_string(),
        }))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(stopped.message, "Stopped service zookeeper");
    assert_eq!(fx.launcher.stop_calls(), 1);

    let after = svc
        .info(Request::new(InfoRequest {
            service: "zookeeper".to_string(),
        }))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(after.message, "Not running service zookeeper");

    // The execution directory survives the stop for postmortem inspection.
    assert!(instance_dir.join("etc/zookeeper.properties").is_file());
}
