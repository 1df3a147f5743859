/// Document written by `wrkit init`
pub const EXAMPLE_DOCUMENT: &str = r#"# wrkit.yaml: example for wrkit
vars:
  SLEEP_ALL_SUCCESS_MSG: "all sleep tasks executed successfully!"

tasks:
  sleep-for-2:
    desc: "sleep for 2 seconds"
    cmds: |
      sleep 2
      echo "i slept for 2 seconds!"
    parallel: true

  sleep-for-3:
    desc: "sleep for 3 seconds"
    cmds: |
      sleep 3
      echo "i slept for 3 seconds!"
    parallel: true

  sleep-all:
    desc: "run all sleep tasks"
    cmds: |
      echo {{.SLEEP_ALL_SUCCESS_MSG}}
    deps:
      - sleep-for-2
      - sleep-for-3
    post:
      - task: report-failure
        when: fail

  report-failure:
    desc: "print a note when sleep-all fails"
    cmds:
      - echo "sleep-all failed" >&2
"#;
