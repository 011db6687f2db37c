pub mod factories;

pub mod form_build {
    use mintform::chain::Chain;
    use mintform::config::Config;
    use mintform::controller::ControllerInterface;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::factories::FormInput;

    pub fn make_config(server: &MockServer) -> Config {
        Config::test_default().with_api_url(server.uri())
    }

    pub fn start_form(config: &Config, chain: Chain) -> ControllerInterface {
        mintform::run::start_controller(config, chain).expect("failed to start controller")
    }

    pub async fn fill(ctl: &ControllerInterface, input: FormInput) {
        for (field, value) in input.0 {
            let applied = ctl
                .update_field(field, value)
                .await
                .expect("failed to update field");
            assert!(applied, "{} not applied", field);
        }
    }

    /// Mounts a `/mint` responder expected to be hit exactly `calls` times.
    pub async fn mount_mint(server: &MockServer, response: ResponseTemplate, calls: u64) {
        Mock::given(method("POST"))
            .and(path("/mint"))
            .respond_with(response)
            .expect(calls)
            .mount(server)
            .await;
    }
}

pub mod asserts {
    use mintform::controller::ControllerInterface;
    use mintform::form::FormSnapshot;

    pub async fn expect_idle(ctl: &ControllerInterface) -> FormSnapshot {
        let state = ctl.get_state().await.expect("failed to get form state");
        assert!(!state.in_flight, "form still in flight");
        state
    }
}
