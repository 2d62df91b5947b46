mod infer_tests;
mod pipeline_tests;
