#[macro_export]
/// Make a GET request expecting JSON.
/// Transport failures are retried according to `$retry`; a 404 resolves to `Ok(None)`.
macro_rules! json_get {
    ($client:expr, $url:expr, $expected:ty, $retry:expr) => {{
        use backon::Retryable;

        let url = $url.clone();
        tracing::debug!(url = url.as_str(), method = "GET", "Dispatching API request");

        let resp = (|| $client.get(url.clone()).send())
            .retry($retry)
            .notify(|err: &reqwest::Error, after: std::time::Duration| {
                tracing::warn!(method = "GET", url = %url, ?after, "Retrying request: {err}");
            })
            .await?;

        $crate::clients::common::handle_json_response::<$expected>(resp, "GET", &url).await
    }};
}

#[macro_export]
/// Make a POST request sending and expecting JSON.
/// Transport failures are retried according to `$retry`; a 404 resolves to `Ok(None)`.
macro_rules! json_post {
    ($client:expr, $url:expr, $body:expr, $expected:ty, $retry:expr) => {{
        use backon::Retryable;

        let url = $url.clone();
        let body = format!("{:?}", $body);

        tracing::debug!(url = url.as_str(), method = "POST", body = body, "Dispatching API request");

        let resp = (|| $client.post(url.clone()).json($body).send())
            .retry($retry)
            .notify(|err: &reqwest::Error, after: std::time::Duration| {
                tracing::warn!(method = "POST", url = %url, ?after, "Retrying request: {err}");
            })
            .await?;

        $crate::clients::common::handle_json_response::<$expected>(resp, "POST", &url).await
    }};
}
