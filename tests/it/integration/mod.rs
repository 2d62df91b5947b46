mod dashboard_workflow_tests;
mod roundtrip_tests;
