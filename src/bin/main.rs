use nwm_archive::{file_list, to_http_url, AnonymousS3, FileQuery, Product};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let store = AnonymousS3::new()?;

    let query = FileQuery::new(Product::Ldasout, "1995").month("02").day("01");
    let keys = file_list(&query, Some(&store)).await?;

    for key in keys {
        println!("{}", to_http_url(&key));
    }

    Ok(())
}
